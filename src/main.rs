//! Terminal runner (default binary).
//!
//! Crossterm supplies input and the framebuffer renderer draws the game. Gravity runs on a
//! `GameLoop` driven by the system clock; key presses are applied as they arrive.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blocktris::config::Config;
use blocktris::core::{Clock, GameLoop, Session, SessionEvent, SystemClock};
use blocktris::event_log::{describe, EventLog};
use blocktris::input::{gate_action, map_key, should_quit};
use blocktris::scores::{is_high_score, submit_score, JsonLinesSink, ScoreSubmission};
use blocktris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blocktris::types::TICK_MS;

fn main() -> Result<()> {
    let config = Config::from_env();

    let mut log = match config.log_path.as_deref() {
        Some(path) => EventLog::open(path)?,
        None => EventLog::disabled(),
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let mut notes = Vec::new();
    let result = run(&mut term, &config, &mut log, &mut notes);

    // Always try to restore terminal state.
    let _ = term.exit();

    for line in &notes {
        println!("{line}");
    }
    if let Some(err) = log.take_error() {
        eprintln!("[Session] Event log disabled: {err}");
    }
    result
}

fn run(
    term: &mut TerminalRenderer,
    config: &Config,
    log: &mut EventLog,
    notes: &mut Vec<String>,
) -> Result<()> {
    let mut game = GameLoop::new(Session::new(config.seed), SystemClock::new());

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let frame_ms = TICK_MS as u64;
    let mut next_frame = game.clock().now_ms();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next frame.
        let timeout = Duration::from_millis(next_frame.saturating_sub(game.clock().now_ms()));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        game.dispose();
                        return Ok(());
                    }
                    let snap = game.snapshot();
                    if let Some(action) =
                        map_key(key).and_then(|a| gate_action(a, snap.playing, snap.game_over))
                    {
                        game.dispatch(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let now = game.clock().now_ms();
        if now >= next_frame {
            next_frame = now + frame_ms;
            game.frame();
        }

        drain_events(&mut game, config, log, notes);
    }
}

fn drain_events(
    game: &mut GameLoop<SystemClock>,
    config: &Config,
    log: &mut EventLog,
    notes: &mut Vec<String>,
) {
    let now = game.clock().now_ms();
    let events = game.session_mut().take_events();
    for event in &events {
        log.record_event(now, event);
        if let Some(line) = describe(event) {
            notes.push(line);
        }
        if let SessionEvent::GameOver { score, .. } = *event {
            if is_high_score(score) {
                notes.push(format!("[Session] New high score: {score}"));
            }
            submit_final_score(game, config, log, notes);
        }
    }
}

fn submit_final_score(
    game: &GameLoop<SystemClock>,
    config: &Config,
    log: &mut EventLog,
    notes: &mut Vec<String>,
) {
    let Some((player, path)) = config.submission_target() else {
        return;
    };

    let submission = match ScoreSubmission::from_snapshot(&game.snapshot(), player) {
        Ok(s) => s,
        Err(e) => {
            notes.push(format!("[Session] Score not submitted: {e}"));
            return;
        }
    };

    let mut sink = match JsonLinesSink::append_to(path) {
        Ok(sink) => sink,
        Err(e) => {
            notes.push(format!("[Session] Score not submitted: {e:#}"));
            return;
        }
    };

    match submit_score(&mut sink, submission, &config.user_id, unix_ms()) {
        Ok(entry) => {
            log.record_submission(game.clock().now_ms(), &entry);
            notes.push(format!(
                "[Session] Submitted {} for {}",
                entry.score, entry.player_name
            ));
        }
        Err(e) => notes.push(format!("[Session] Score not submitted: {e}")),
    }
}

fn unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
