//! TerminalPresenter: shows a pixel surface in a real terminal.
//!
//! Two surface rows share one terminal row through half-block glyphs. The
//! first frame (and any size change) is a full redraw, later frames only
//! rewrite changed runs.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::presenter::Presenter;
use crate::surface::{is_lit, Surface};

const LIT_FG: Color = Color::Rgb {
    r: 220,
    g: 220,
    b: 255,
};
const DARK_BG: Color = Color::Rgb { r: 0, g: 0, b: 0 };

/// Largest horizontal scale; 128 columns become 1024 terminal cells.
pub const MAX_SCALE: u16 = 8;

/// Terminal glyphs for one presented frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphGrid {
    width: u16,
    height: u16,
    glyphs: Vec<char>,
}

impl GlyphGrid {
    /// Convert a surface, repeating every column `scale` times.
    ///
    /// `scale` is clamped to `1..=MAX_SCALE`.
    pub fn from_surface(surface: &Surface, scale: u16) -> Self {
        let scale = scale.clamp(1, MAX_SCALE);
        let width = surface.width().saturating_mul(scale);
        let height = surface.height().div_ceil(2);
        let mut glyphs = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height as i32 {
            for col in 0..width as i32 {
                let x = col / scale as i32;
                let top = surface.get(x, row * 2).is_some_and(is_lit);
                let bottom = surface.get(x, row * 2 + 1).is_some_and(is_lit);
                glyphs.push(match (top, bottom) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                });
            }
        }
        Self {
            width,
            height,
            glyphs,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.glyphs[y as usize * self.width as usize + x as usize])
    }
}

pub struct TerminalPresenter<W: Write = io::Stdout> {
    out: W,
    scale: u16,
    last: Option<GlyphGrid>,
    buf: Vec<u8>,
}

impl TerminalPresenter<io::Stdout> {
    pub fn new(scale: u16) -> Self {
        Self::with_writer(io::stdout(), scale)
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn with_writer(out: W, scale: u16) -> Self {
        Self {
            out,
            scale: scale.max(1),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, surface: &Surface) -> Result<()> {
        let next = GlyphGrid::from_surface(surface, self.scale);
        self.buf.clear();
        match self.last.as_ref() {
            Some(prev) if prev.width() == next.width() && prev.height() == next.height() => {
                encode_diff_into(prev, &next, &mut self.buf)?;
            }
            _ => encode_full_into(&next, &mut self.buf)?,
        }
        self.flush_buf()?;
        self.last = Some(next);
        Ok(())
    }

    fn invalidate(&mut self) {
        self.last = None;
    }
}

/// Raw mode, and optionally the alternate screen, for as long as it lives.
///
/// Dropping the session restores the terminal, on error paths too.
pub struct TerminalSession {
    alternate: bool,
    active: bool,
}

impl TerminalSession {
    pub fn enter(alternate: bool) -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut session = Self {
            alternate,
            active: true,
        };
        if alternate {
            let mut buf = Vec::new();
            buf.queue(terminal::EnterAlternateScreen)?;
            buf.queue(cursor::Hide)?;
            buf.queue(terminal::DisableLineWrap)?;
            session.write(&buf)?;
        }
        Ok(session)
    }

    pub fn leave(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        if self.alternate {
            let mut buf = Vec::new();
            buf.queue(ResetColor)?;
            buf.queue(SetAttribute(Attribute::Reset))?;
            buf.queue(terminal::EnableLineWrap)?;
            buf.queue(cursor::Show)?;
            buf.queue(terminal::LeaveAlternateScreen)?;
            self.write(&buf)?;
        }
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let mut out = io::stdout();
        out.write_all(bytes)?;
        out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(grid: &GlyphGrid, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;
    apply_style_into(out)?;

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            out.queue(Print(grid.get(x, y).unwrap_or(' ')))?;
        }
        if y + 1 < grid.height() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
pub fn encode_diff_into(prev: &GlyphGrid, next: &GlyphGrid, out: &mut Vec<u8>) -> Result<()> {
    let mut styled = false;
    for_each_changed_run(prev, next, |x, y, len| {
        if !styled {
            apply_style_into(out)?;
            styled = true;
        }
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            out.queue(Print(next.get(x + dx, y).unwrap_or(' ')))?;
        }
        Ok(())
    })?;

    if styled {
        out.queue(ResetColor)?;
    }
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>) -> Result<()> {
    out.queue(SetForegroundColor(LIT_FG))?;
    out.queue(SetBackgroundColor(DARK_BG))?;
    Ok(())
}

fn for_each_changed_run(
    prev: &GlyphGrid,
    next: &GlyphGrid,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    for y in 0..next.height() {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
