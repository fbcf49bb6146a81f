//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`]) is a
//! full redraw; later frames only write the runs of cells that changed.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Render into any writer (raw mode is only toggled by `enter`/`exit`).
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// Callers keep one `FrameBuffer` and pass it in every frame. The renderer diffs against
    /// the previous frame and then swaps buffers, so the caller gets the old one back to
    /// render into.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf).context("write frame")?;
        self.out.flush().context("flush frame")?;
        Ok(())
    }
}

/// Queues cells into a writer, re-sending style commands only when the style changes.
struct CellWriter<'a, W: Write> {
    out: &'a mut W,
    style: Option<CellStyle>,
}

impl<'a, W: Write> CellWriter<'a, W> {
    fn new(out: &'a mut W) -> Self {
        Self { out, style: None }
    }

    fn put(&mut self, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            let style = cell.style;
            self.out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
            self.out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
            self.out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(style);
        }
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Queue a full-frame redraw into `out` without flushing.
pub fn encode_full_into<W: Write>(fb: &FrameBuffer, out: &mut W) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut cells = CellWriter::new(out);
    for y in 0..fb.height() {
        if y > 0 {
            cells.out.queue(Print("\r\n"))?;
        }
        for x in 0..fb.width() {
            cells.put(fb.get(x, y).unwrap_or_default())?;
        }
    }
    cells.finish()
}

/// Queue only the changed runs between two same-sized frames into `out`.
pub fn encode_diff_into<W: Write>(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    out: &mut W,
) -> Result<()> {
    let mut cells = CellWriter::new(out);
    for_each_changed_run(prev, next, |x, y, len| {
        cells.out.queue(cursor::MoveTo(x, y))?;
        (x..x + len).try_for_each(|cx| cells.put(next.get(cx, y).unwrap_or_default()))
    })?;
    cells.finish()
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        // Size changed: treat everything as dirty in a single pass (row runs).
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    let h = next.height();

    for y in 0..h {
        let mut x = 0;
        while x < w {
            let a = prev.get(x, y).unwrap_or_default();
            let b = next.get(x, y).unwrap_or_default();
            if a == b {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w {
                let a2 = prev.get(x, y).unwrap_or_default();
                let b2 = next.get(x, y).unwrap_or_default();
                if a2 == b2 {
                    break;
                }
                x += 1;
            }
            let len = x - start;
            f(start, y, len)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::CellStyle;

    fn frame_with(text: &str) -> FrameBuffer {
        let mut fb = FrameBuffer::new(8, 2);
        fb.put_str(0, 0, text, CellStyle::default());
        fb
    }

    #[test]
    fn first_draw_is_full_and_later_draws_are_diffs() {
        let mut renderer = TerminalRenderer::with_writer(Vec::new());

        let mut fb = frame_with("SCORE");
        renderer.draw_swap(&mut fb).unwrap();
        let full = renderer.writer().len();
        assert!(String::from_utf8_lossy(renderer.writer()).contains("SCORE"));

        // Unchanged frame: only the trailing style reset is written.
        let mut same = frame_with("SCORE");
        renderer.draw_swap(&mut same).unwrap();
        let unchanged = renderer.writer().len() - full;
        assert!(unchanged < full);
        assert!(!String::from_utf8_lossy(&renderer.writer()[full..]).contains("SCORE"));
    }

    #[test]
    fn resize_forces_full_redraw() {
        let mut renderer = TerminalRenderer::with_writer(Vec::new());
        let mut small = frame_with("AB");
        renderer.draw_swap(&mut small).unwrap();
        let before = renderer.writer().len();

        let mut large = FrameBuffer::new(10, 3);
        large.put_str(0, 2, "AB", CellStyle::default());
        renderer.draw_swap(&mut large).unwrap();
        assert!(String::from_utf8_lossy(&renderer.writer()[before..]).contains("AB"));
        // The caller gets the previous buffer back, resized to the new frame.
        assert_eq!((large.width(), large.height()), (10, 3));
    }

    #[test]
    fn diff_of_identical_frames_writes_no_cells() {
        let a = frame_with("LEVEL 3");
        let b = frame_with("LEVEL 3");
        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        assert!(!String::from_utf8_lossy(&out).contains("LEVEL"));

        let c = frame_with("LEVEL 4");
        out.clear();
        encode_diff_into(&a, &c, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('4'));
        assert!(!text.contains("LEVEL"));
    }

    #[test]
    fn full_frame_repeats_style_only_on_change() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(0, 0, "ab", CellStyle::default().bold());
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();

        let mut bold = Vec::new();
        bold.queue(SetAttribute(Attribute::Bold)).unwrap();
        let needle = String::from_utf8(bold).unwrap();
        assert_eq!(String::from_utf8_lossy(&out).matches(needle.as_str()).count(), 1);
    }

    #[test]
    fn rgb_maps_to_truecolor() {
        let style = CellStyle::default();
        assert_eq!(
            rgb_to_color(style.fg),
            Color::Rgb {
                r: style.fg.r,
                g: style.fg.g,
                b: style.fg.b
            }
        );
    }

    #[test]
    fn changed_run_iterator_coalesces_adjacent_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(5, 1);
        let mut b = FrameBuffer::new(5, 1);

        for x in 1..=3 {
            b.put_char(x, 0, 'X', style);
        }

        let mut runs = Vec::new();
        for_each_changed_run(&a, &b, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, vec![(1, 0, 3)]);
    }
}
