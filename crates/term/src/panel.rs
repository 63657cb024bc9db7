//! SSD1306 panel output.
//!
//! The panel memory is organised in pages of 8 pixel rows. Each byte holds
//! one column of a page, least significant bit at the top.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::presenter::Presenter;
use crate::surface::{is_lit, Surface};

/// Size in bytes of one page-packed frame for a surface.
pub fn frame_len(width: u16, height: u16) -> usize {
    width as usize * height.div_ceil(8) as usize
}

/// Pack `surface` into SSD1306 page layout.
///
/// `out` is resized to [`frame_len`] bytes.
pub fn encode_pages_into(surface: &Surface, out: &mut Vec<u8>) {
    let width = surface.width() as usize;
    out.clear();
    out.resize(frame_len(surface.width(), surface.height()), 0);
    for (i, &p) in surface.pixels().iter().enumerate() {
        if !is_lit(p) {
            continue;
        }
        let x = i % width;
        let y = i / width;
        out[(y / 8) * width + x] |= 1 << (y % 8);
    }
}

/// Writes page-packed frames to a byte sink (the panel device node).
pub struct PanelPresenter<W: Write> {
    sink: W,
    frame: Vec<u8>,
    frames_sent: u64,
}

impl PanelPresenter<std::fs::File> {
    /// Open the panel device for writing.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .open(path)
            .with_context(|| format!("failed to open panel device {}", path.display()))?;
        Ok(Self::new(file))
    }
}

impl<W: Write> PanelPresenter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            frame: Vec::new(),
            frames_sent: 0,
        }
    }

    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }
}

impl<W: Write> Presenter for PanelPresenter<W> {
    fn present(&mut self, surface: &Surface) -> Result<()> {
        encode_pages_into(surface, &mut self.frame);
        self.sink
            .write_all(&self.frame)
            .context("panel transfer failed")?;
        self.sink.flush()?;
        self.frames_sent += 1;
        debug!(frame = self.frames_sent, bytes = self.frame.len(), "panel frame sent");
        Ok(())
    }
}
