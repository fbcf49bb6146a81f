use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blocktris::core::{spawn, transform, Board, Session};
use blocktris::types::{GameAction, PieceKind};

fn bench_gravity_tick(c: &mut Criterion) {
    let mut session = Session::new(12345);
    session.start();

    c.bench_function("gravity_tick", |b| {
        b.iter(|| {
            if session.game_over() {
                session.start();
            }
            black_box(session.gravity_tick());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut board = Board::new();
    for y in 16..20 {
        for x in 0..10 {
            board.set(x, y, Some(PieceKind::I));
        }
    }

    c.bench_function("collapse_4_rows", |b| {
        b.iter(|| black_box(black_box(&board).collapse_full_rows()))
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut session = Session::new(12345);
    session.start();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if session.game_over() {
                session.start();
            }
            black_box(session.apply_action(GameAction::HardDrop));
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let board = Board::new();
    let piece = spawn(PieceKind::T).at((4, 10));

    c.bench_function("rotate", |b| {
        b.iter(|| black_box(transform::rotate(&board, black_box(&piece))))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut session = Session::new(12345);
    session.start();

    c.bench_function("snapshot", |b| b.iter(|| black_box(session.snapshot())));
}

criterion_group!(
    benches,
    bench_gravity_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_rotate,
    bench_snapshot
);
criterion_main!(benches);
