//! Frame composition and render scheduling.

use tracing::trace;

use crate::error::EngineError;
use crate::term::{Presenter, SpriteBank, Surface, BLACK};
use crate::world::World;

/// When the scheduler composes and presents a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPolicy {
    /// Every tick. Cheap targets such as a terminal.
    Unconditional,
    /// Only when something marked the frame dirty. Slow targets such as the panel.
    DirtyGated,
}

/// "Something visible changed since the last composed frame."
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyFlag(bool);

impl DirtyFlag {
    pub fn set(&mut self) {
        self.0 = true;
    }

    pub fn is_set(&self) -> bool {
        self.0
    }

    /// Read and clear.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.0)
    }
}

pub struct RenderScheduler {
    policy: RenderPolicy,
    surface: Surface,
    compositions: u64,
}

impl RenderScheduler {
    pub fn new(policy: RenderPolicy, width: u16, height: u16) -> Self {
        Self {
            policy,
            surface: Surface::new(width, height),
            compositions: 0,
        }
    }

    pub fn policy(&self) -> RenderPolicy {
        self.policy
    }

    /// Last composed frame.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Number of frames composed so far.
    pub fn compositions(&self) -> u64 {
        self.compositions
    }

    /// End-of-tick render step. Returns whether a frame was presented.
    ///
    /// The dirty flag is consumed in either policy.
    pub fn run(
        &mut self,
        dirty: &mut DirtyFlag,
        world: &World,
        sprites: &SpriteBank,
        presenter: &mut dyn Presenter,
    ) -> Result<bool, EngineError> {
        let was_dirty = dirty.take();
        if self.policy == RenderPolicy::DirtyGated && !was_dirty {
            return Ok(false);
        }
        compose(&mut self.surface, world, sprites);
        self.compositions += 1;
        presenter.present(&self.surface).map_err(EngineError::Present)?;
        Ok(true)
    }
}

/// Clear `surface` to black and paint every drawable in creation order.
pub fn compose(surface: &mut Surface, world: &World, sprites: &SpriteBank) {
    surface.clear(BLACK);
    for (entity, t, id) in world.drawables() {
        match sprites.get(id) {
            Some(sprite) => surface.blit(sprite, t.x, t.y),
            None => trace!(?entity, sprite = id.as_str(), "sprite missing, skipped"),
        }
    }
}
