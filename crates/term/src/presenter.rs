//! Presentation targets.

use anyhow::Result;

use crate::surface::Surface;

/// Pushes a composed surface to a display.
///
/// Implementations own whatever device state they need (terminal diff
/// history, panel page buffer).
pub trait Presenter {
    fn present(&mut self, surface: &Surface) -> Result<()>;

    /// Forget device-side history; the next frame is sent in full.
    fn invalidate(&mut self) {}
}

/// Presenter that only counts frames. Used headless and in tests.
#[derive(Debug, Default, Clone)]
pub struct NullPresenter {
    frames: u64,
}

impl NullPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Presenter for NullPresenter {
    fn present(&mut self, _surface: &Surface) -> Result<()> {
        self.frames += 1;
        Ok(())
    }
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn present(&mut self, surface: &Surface) -> Result<()> {
        (**self).present(surface)
    }

    fn invalidate(&mut self) {
        (**self).invalidate()
    }
}
