//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, GameSnapshot, PieceSnapshot, Shape};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Widest panel line, the controls legend.
const PANEL_MIN_W: u16 = 14;

const CONTROLS: [&str; 5] = [
    "←→  move",
    "↑   rotate",
    "↓   soft drop",
    "SPC hard drop",
    "P   pause",
];

/// A lightweight terminal view of the game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Bordered play area, in terminal cells.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn frame(&self, viewport: Viewport) -> Frame {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        // Leave room for the side panel when the terminal is wide enough.
        let total_w = w + 2 + PANEL_MIN_W + 2;
        let x = viewport.width.saturating_sub(total_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the terminal
    /// size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame = self.frame(viewport);
        let board_w = frame.w - 2;
        let board_h = frame.h - 2;

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            board_w,
            board_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG),
        );
        self.draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));

        // Settled cells.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => self.draw_board_cell(fb, frame, x as u16, y as u16, *kind),
                    None => self.draw_empty_cell(fb, frame, x as u16, y as u16),
                }
            }
        }

        if let Some(current) = snap.current {
            // Landing preview, only while the piece can still be steered.
            if snap.playable() {
                if let Some(ghost_y) = snap.ghost_y {
                    let ghost = PieceSnapshot { y: ghost_y, ..current };
                    let style = CellStyle::new(Rgb::new(140, 140, 140), PLAY_BG).dim();
                    for (x, y) in ghost.cells() {
                        if let Some((x, y)) = on_board(x, y) {
                            self.fill_cell_rect(fb, frame, x, y, '░', style);
                        }
                    }
                }
            }

            for (x, y) in current.cells() {
                if let Some((x, y)) = on_board(x, y) {
                    self.draw_board_cell(fb, frame, x, y, current.kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.paused {
            self.draw_overlay(fb, frame, &["PAUSED", "P to resume"]);
        } else if snap.game_over {
            let mut score = [0u8; 16];
            let score = format_score(snap.score, &mut score);
            self.draw_overlay(fb, frame, &["GAME OVER", score, "ENTER: new game"]);
        } else if !snap.playing {
            self.draw_overlay(fb, frame, &["BLOCKTRIS", "ENTER to start"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(piece_color(kind), PLAY_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_W {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        for (name, v) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        match snap.next {
            Some(kind) => {
                let shape = get_shape(kind, 0);
                self.draw_preview(fb, panel_x, y, &shape, kind);
            }
            None => fb.put_str(panel_x, y, "-", value),
        }
        // Tallest preview is two rows (I spawns flat), plus a blank line.
        y = y.saturating_add(3);

        let hint = value.dim();
        for line in CONTROLS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    /// Next-piece preview as the shape's occupancy matrix.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, shape: &Shape, kind: PieceKind) {
        let style = CellStyle::new(piece_color(kind), PANEL_BG).bold();
        for (dx, dy) in shape.minos() {
            let px = x + (dx as u16) * self.cell_w;
            let py = y + (dy as u16) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let top = frame
            .y
            .saturating_add(frame.h / 2)
            .saturating_sub(lines.len() as u16 / 2);
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
            fb.put_str(x, top.saturating_add(i as u16), text, style);
        }
    }
}

fn on_board(x: i8, y: i8) -> Option<(u16, u16)> {
    if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
        Some((x as u16, y as u16))
    } else {
        None
    }
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

/// "SCORE 1234" into a stack buffer.
fn format_score(score: u32, buf: &mut [u8; 16]) -> &str {
    const PREFIX: &[u8] = b"SCORE ";
    buf[..PREFIX.len()].copy_from_slice(PREFIX);
    let mut digits = [0u8; 10];
    let mut n = score;
    let mut len = 0;
    loop {
        digits[len] = b'0' + (n % 10) as u8;
        len += 1;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    for (i, d) in digits[..len].iter().rev().enumerate() {
        buf[PREFIX.len() + i] = *d;
    }
    std::str::from_utf8(&buf[..PREFIX.len() + len]).unwrap_or("SCORE")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_score_uses_stack_buffer() {
        let mut buf = [0u8; 16];
        assert_eq!(format_score(0, &mut buf), "SCORE 0");
        assert_eq!(format_score(4_294_967_295, &mut buf), "SCORE 4294967295");
    }

    #[test]
    fn on_board_clips_cells_above_top() {
        assert_eq!(on_board(0, -1), None);
        assert_eq!(on_board(10, 0), None);
        assert_eq!(on_board(9, 19), Some((9, 19)));
    }
}
