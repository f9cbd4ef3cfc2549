//! Terminal output for rendered frames.
//!
//! [`TerminalRenderer`] keeps the last frame it wrote. A frame of the same
//! size goes out as the runs of cells that differ from it; the first frame,
//! a resized one, or one after [`TerminalRenderer::invalidate`] is repainted
//! from scratch.

use std::io::{self, Stdout, Write};
use std::ops::Range;

use anyhow::{Context, Result};
use crossterm::{
    cursor, queue,
    style::{Attribute, Color, Colors, Print, ResetColor, SetAttribute, SetColors},
    terminal,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = Stdout> {
    out: W,
    front: Option<FrameBuffer>,
    bytes: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Raw mode on the alternate screen, cursor hidden.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        queue!(
            self.bytes,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        self.flush()
    }

    /// Undo [`enter`](Self::enter). Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        queue!(
            self.bytes,
            ResetColor,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        self.flush()?;
        terminal::disable_raw_mode().context("disabling raw mode")
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            front: None,
            bytes: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Repaint everything on the next draw (after a terminal resize).
    pub fn invalidate(&mut self) {
        self.front = None;
    }

    /// Write `frame` and take it as the new front buffer.
    ///
    /// The previous front buffer is handed back through `frame`, so the
    /// caller renders the next frame into it without allocating.
    pub fn draw_swap(&mut self, frame: &mut FrameBuffer) -> Result<()> {
        self.bytes.clear();
        let mut back = match self.front.take() {
            Some(front) if front.same_size(frame) => {
                encode_diff_into(&front, frame, &mut self.bytes)?;
                front
            }
            stale => {
                encode_full_into(frame, &mut self.bytes)?;
                let mut back = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                back.resize(frame.width(), frame.height());
                back
            }
        };
        self.flush()?;

        std::mem::swap(&mut back, frame);
        self.front = Some(back);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out
            .write_all(&self.bytes)
            .and_then(|()| self.out.flush())
            .context("writing frame to terminal")?;
        self.bytes.clear();
        Ok(())
    }
}

/// Clear the screen and paint every cell of `frame`.
pub fn encode_full_into(frame: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
    queue!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
    let mut painter = Painter::new(out);
    for y in 0..frame.height() {
        if y > 0 {
            painter.newline()?;
        }
        painter.cells(frame.row(y))?;
    }
    painter.finish()
}

/// Paint only the cells of `next` that differ from `prev`.
///
/// Writes nothing when the frames are equal.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
    let mut painter = Painter::new(out);
    for (y, cols) in changed_runs(prev, next) {
        painter.move_to(cols.start, y)?;
        painter.cells(&next.row(y)[usize::from(cols.start)..usize::from(cols.end)])?;
    }
    painter.finish()
}

/// Emits cells, switching the terminal style only when it changes.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn move_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(x, y))
    }

    fn newline(&mut self) -> io::Result<()> {
        queue!(self.out, Print("\r\n"))
    }

    fn cells(&mut self, cells: &[Cell]) -> io::Result<()> {
        for cell in cells {
            if self.style != Some(cell.style) {
                set_style(self.out, cell.style)?;
                self.style = Some(cell.style);
            }
            queue!(self.out, Print(cell.ch))?;
        }
        Ok(())
    }

    fn finish(self) -> io::Result<()> {
        if self.style.is_none() {
            return Ok(());
        }
        queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))
    }
}

// SGR reset clears colors too, so it goes first.
fn set_style(out: &mut Vec<u8>, style: CellStyle) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetColors(Colors::new(style.fg.into(), style.bg.into()))
    )?;
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

/// Runs of differing cells as `(row, columns)`. Frames of different sizes
/// differ everywhere.
fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = (u16, Range<u16>)> + 'a {
    let resized = !prev.same_size(next);
    (0..next.height()).flat_map(move |y| {
        let old = if resized { &[][..] } else { prev.row(y) };
        RowRuns {
            old,
            new: next.row(y),
            x: 0,
        }
        .map(move |cols| (y, cols))
    })
}

struct RowRuns<'a> {
    old: &'a [Cell],
    new: &'a [Cell],
    x: usize,
}

impl Iterator for RowRuns<'_> {
    type Item = Range<u16>;

    fn next(&mut self) -> Option<Range<u16>> {
        let (old, new) = (self.old, self.new);
        let differs = |x: usize| old.get(x) != Some(&new[x]);

        let start = (self.x..new.len()).find(|&x| differs(x))?;
        let end = (start..new.len())
            .find(|&x| !differs(x))
            .unwrap_or(new.len());
        self.x = end;
        Some(start as u16..end as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(a: &FrameBuffer, b: &FrameBuffer) -> Vec<(u16, Range<u16>)> {
        changed_runs(a, b).collect()
    }

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(5, 2);
        let mut b = FrameBuffer::new(5, 2);

        b.put_str(1, 0, "XXX", style);
        b.put_char(4, 1, 'Y', style);

        assert_eq!(runs(&a, &b), vec![(0, 1..4), (1, 4..5)]);
    }

    #[test]
    fn size_change_marks_every_row() {
        let a = FrameBuffer::new(2, 2);
        let b = FrameBuffer::new(3, 2);
        assert_eq!(runs(&a, &b), vec![(0, 0..3), (1, 0..3)]);
    }

    #[test]
    fn identical_frames_encode_nothing() {
        let a = FrameBuffer::new(4, 3);
        let mut out = Vec::new();
        encode_diff_into(&a, &a.clone(), &mut out).unwrap();
        assert!(out.is_empty());

        let mut changed = a.clone();
        changed.put_char(2, 1, 'Q', CellStyle::default().bold());
        encode_diff_into(&a, &changed, &mut out).unwrap();
        assert_eq!(text(&out).matches('Q').count(), 1);
    }

    #[test]
    fn full_redraw_prints_every_row() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(0, 0, "abc", CellStyle::default());
        fb.put_str(0, 1, "def", CellStyle::default());

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        assert!(text(&out).contains("abc\r\ndef"));
    }

    #[test]
    fn draw_swap_repaints_only_after_resize_or_invalidate() {
        let clear = "\x1b[2J";
        let mut renderer = TerminalRenderer::with_writer(Vec::new());

        let mut frame = FrameBuffer::new(4, 2);
        frame.put_str(0, 0, "ab", CellStyle::default());
        renderer.draw_swap(&mut frame).unwrap();
        assert_eq!(text(renderer.writer()).matches(clear).count(), 1);

        // The old front buffer comes back blank at the same size
        assert!(frame.same_size(&FrameBuffer::new(4, 2)));
        frame.put_str(0, 0, "ab", CellStyle::default());
        let written = renderer.writer().len();
        renderer.draw_swap(&mut frame).unwrap();
        assert_eq!(renderer.writer().len(), written);

        frame.resize(5, 2);
        renderer.draw_swap(&mut frame).unwrap();
        assert_eq!(text(renderer.writer()).matches(clear).count(), 2);

        renderer.invalidate();
        frame.resize(5, 2);
        renderer.draw_swap(&mut frame).unwrap();
        assert_eq!(text(renderer.writer()).matches(clear).count(), 3);
    }
}
