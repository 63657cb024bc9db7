//! Wiring: platform selection, player construction and the main loop.

use std::fs::File;
use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::cli::PlayerType;
use crate::config::Config;
use crate::core::{CorsoState, RandomStrategy};
use crate::engine::{
    AutonomousPlayer, DecisionPool, FramePacer, Game, InteractivePlayer, Player, RenderPolicy, TickReport,
};
use crate::input::{InputPump, TickInput};
use crate::term::{PanelPresenter, Presenter, TerminalPresenter};
use crate::types::Outcome;

/// Where frames go.
pub enum Platform<P = PanelPresenter<File>> {
    Desktop,
    Panel(P),
}

impl<P> Platform<P> {
    /// Panel when a device is configured and opens, desktop otherwise.
    pub fn select(
        force_desktop: bool,
        panel_device: Option<&Path>,
        open: impl FnOnce(&Path) -> Result<P>,
    ) -> Self {
        let Some(device) = panel_device else {
            return Platform::Desktop;
        };
        if force_desktop {
            warn!(device = %device.display(), "panel configured but desktop forced");
            return Platform::Desktop;
        }
        match open(device) {
            Ok(panel) => Platform::Panel(panel),
            Err(e) => {
                warn!(device = %device.display(), error = %e, "panel unavailable, falling back to desktop");
                Platform::Desktop
            }
        }
    }

    pub fn policy(&self) -> RenderPolicy {
        match self {
            Platform::Desktop => RenderPolicy::Unconditional,
            Platform::Panel(_) => RenderPolicy::DirtyGated,
        }
    }

    pub fn is_desktop(&self) -> bool {
        matches!(self, Platform::Desktop)
    }
}

impl<P: Presenter + 'static> Platform<P> {
    pub fn into_presenter(self, scale: u16) -> Box<dyn Presenter> {
        match self {
            Platform::Desktop => Box::new(TerminalPresenter::new(scale)),
            Platform::Panel(panel) => Box::new(panel),
        }
    }
}

/// Build players in turn order. Random players get distinct seeds.
pub fn build_players(
    lineup: &[PlayerType],
    config: &Config,
    pool: &DecisionPool,
) -> Vec<Player<CorsoState>> {
    let base_seed = config.seed.unwrap_or_else(clock_seed);
    lineup
        .iter()
        .enumerate()
        .map(|(i, ty)| match ty {
            PlayerType::User => Player::Interactive(InteractivePlayer::new()),
            PlayerType::Random => {
                let strategy = RandomStrategy::new(base_seed.wrapping_add(i as u32))
                    .with_think_delay(config.think_delay());
                Player::Autonomous(AutonomousPlayer::new(strategy, pool.handle()))
            }
        })
        .collect()
}

/// Initial rules state sized by the config.
pub fn initial_state(config: &Config, players: usize) -> CorsoState {
    CorsoState::with_players(config.board_width, config.board_height, players)
}

fn clock_seed() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// What the loop should do after a batch of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Stop on Quit, or on any key once the game is over.
pub fn control_for(input: &TickInput, game_over: bool) -> LoopControl {
    if input.quit_requested() || (game_over && !input.keys.is_empty()) {
        LoopControl::Stop
    } else {
        LoopControl::Continue
    }
}

/// `poll input -> pace -> tick` until the player leaves.
pub fn run_loop(
    game: &mut Game<CorsoState>,
    pump: &mut InputPump,
    pacer: &mut FramePacer,
) -> Result<Option<Outcome>> {
    let mut announced = false;
    loop {
        let input = pump.poll(pacer.remaining(std::time::Instant::now()))?;
        pacer.wait();

        if control_for(&input, game.is_over()) == LoopControl::Stop {
            info!(frame = game.frame(), "leaving");
            return Ok(game.outcome());
        }
        if input.resized {
            game.invalidate_display();
        }

        let TickReport { game_over, .. } = game.tick(&input.keys)?;
        pacer.end_tick();
        if let (Some(outcome), false) = (game_over, announced) {
            announced = true;
            info!(%outcome, "press any key to exit");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameModel;
    use crate::input::KeyBatch;
    use crate::term::NullPresenter;
    use crate::types::LogicalKey;
    use anyhow::anyhow;

    #[test]
    fn no_device_means_desktop() {
        let p: Platform<NullPresenter> =
            Platform::select(false, None, |_| panic!("must not open"));
        assert!(p.is_desktop());
        assert_eq!(p.policy(), RenderPolicy::Unconditional);
    }

    #[test]
    fn working_device_means_panel() {
        let p = Platform::select(false, Some(Path::new("/dev/i2c-1")), |_| Ok(NullPresenter::new()));
        assert!(!p.is_desktop());
        assert_eq!(p.policy(), RenderPolicy::DirtyGated);
    }

    #[test]
    fn broken_device_falls_back() {
        let p: Platform<NullPresenter> =
            Platform::select(false, Some(Path::new("/dev/nope")), |_| Err(anyhow!("no such device")));
        assert!(p.is_desktop());
    }

    #[test]
    fn forced_desktop_wins() {
        let p: Platform<NullPresenter> =
            Platform::select(true, Some(Path::new("/dev/i2c-1")), |_| panic!("must not open"));
        assert!(p.is_desktop());
    }

    #[test]
    fn lineup_becomes_players() {
        let pool = DecisionPool::new(1).unwrap();
        let config = Config {
            seed: Some(5),
            ..Config::default()
        };
        let players = build_players(
            &[PlayerType::Random, PlayerType::User],
            &config,
            &pool,
        );
        assert!(players[0].as_autonomous().is_some());
        assert!(players[1].as_interactive().is_some());
        assert_eq!(initial_state(&config, players.len()).player_count(), 2);
    }

    #[test]
    fn quit_or_key_after_game_over_stops() {
        let mut keys = KeyBatch::new();
        keys.push(LogicalKey::Confirm);
        let input = TickInput {
            keys,
            resized: false,
        };
        assert_eq!(control_for(&input, false), LoopControl::Continue);
        assert_eq!(control_for(&input, true), LoopControl::Stop);
        assert_eq!(control_for(&TickInput::default(), true), LoopControl::Continue);

        let mut keys = KeyBatch::new();
        keys.push(LogicalKey::Quit);
        let quit = TickInput {
            keys,
            resized: false,
        };
        assert_eq!(control_for(&quit, false), LoopControl::Stop);
    }
}
