//! The game context and its per-tick step.
//!
//! [`Game`] owns everything a running match needs: the orchestrator (rules
//! state and players), the entity world, the board registry, the dirty flag,
//! the render scheduler and the presenter. There is no global state; two
//! games can run side by side.
//!
//! One [`Game::tick`]:
//!
//! 1. advance the frame counter
//! 2. dispatch each key, depth-first, in arrival order
//! 3. poll the active autonomous player and dispatch its proposal
//! 4. run the render step

use tracing::trace;

use crate::board::{BoardLayout, BoardRegistry};
use crate::core::GameModel;
use crate::cursor::CursorMarkers;
use crate::error::EngineError;
use crate::events::{EventBus, EventTag, GameEvent, Listener};
use crate::orchestrator::{Orchestrator, Stage, TurnPhase};
use crate::player::{Player, PlayerKind};
use crate::render::{DirtyFlag, RenderPolicy, RenderScheduler};
use crate::term::{Presenter, SpriteBank, SpriteId, Surface};
use crate::types::{LogicalKey, Outcome, PlayerIndex, BONNET_HEIGHT, BONNET_WIDTH};
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub frame: u64,
    /// A frame was composed and presented this tick.
    pub rendered: bool,
    pub game_over: Option<Outcome>,
}

pub struct Game<S: GameModel> {
    orchestrator: Orchestrator<S>,
    world: World,
    board: BoardRegistry,
    markers: Option<CursorMarkers>,
    dirty: DirtyFlag,
    render: RenderScheduler,
    presenter: Box<dyn Presenter>,
    sprites: SpriteBank,
    bus: EventBus,
    frame: u64,
    started: bool,
}

impl<S: GameModel> Game<S> {
    pub fn new(
        initial: S,
        players: Vec<Player<S>>,
        policy: RenderPolicy,
        presenter: Box<dyn Presenter>,
    ) -> Result<Self, EngineError> {
        let sprites = SpriteBank::builtin();
        let (cell_w, cell_h) = sprites.cell_size();
        let layout = BoardLayout::for_cell_size(cell_w, cell_h);

        let mut world = World::new();
        let mut board = BoardRegistry::new(initial.width(), initial.height(), layout);
        board.sync(&initial, &mut world);

        let markers = players
            .iter()
            .any(|p| p.kind() == PlayerKind::Interactive)
            .then(|| {
                let marker_w = sprites.get(SpriteId::HorCursor).map_or(0, |s| s.width());
                CursorMarkers::spawn(&mut world, &layout, marker_w)
            });

        Ok(Self {
            orchestrator: Orchestrator::new(initial, players)?,
            world,
            board,
            markers,
            dirty: DirtyFlag::default(),
            render: RenderScheduler::new(policy, BONNET_WIDTH, BONNET_HEIGHT),
            presenter,
            sprites,
            bus: EventBus::new(),
            frame: 0,
            started: false,
        })
    }

    /// Observe events of one kind.
    pub fn subscribe(&mut self, tag: EventTag, listener: Listener) {
        self.bus.subscribe(tag, listener);
    }

    /// Begin the first turn. The first tick always renders.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.started {
            return Err(EngineError::invariant("game started twice"));
        }
        self.started = true;
        self.dirty.set();
        for event in self.orchestrator.start(self.frame)? {
            self.dispatch(event)?;
        }
        Ok(())
    }

    pub fn tick(&mut self, keys: &[LogicalKey]) -> Result<TickReport, EngineError> {
        if !self.started {
            return Err(EngineError::invariant("tick before start"));
        }
        self.frame += 1;

        for &key in keys {
            self.dispatch(GameEvent::KeyDown(key))?;
        }

        if let Some(event) = self.orchestrator.poll()? {
            self.dispatch(event)?;
        }

        let rendered = self.render.run(
            &mut self.dirty,
            &self.world,
            &self.sprites,
            self.presenter.as_mut(),
        )?;

        Ok(TickReport {
            frame: self.frame,
            rendered,
            game_over: self.orchestrator.outcome(),
        })
    }

    /// The display lost its contents (terminal resize). Redraw in full.
    pub fn invalidate_display(&mut self) {
        self.presenter.invalidate();
        self.dirty.set();
    }

    fn dispatch(&mut self, event: GameEvent) -> Result<(), EngineError> {
        trace!(?event, frame = self.frame, "dispatch");
        self.bus.publish(&event);

        match event {
            GameEvent::KeyDown(key) => {
                for index in 0..self.orchestrator.player_count() {
                    if let Some(next) = self.orchestrator.deliver_key(index, key, self.frame) {
                        self.dispatch(next)?;
                    }
                }
            }
            GameEvent::TurnBegan {
                kind: PlayerKind::Autonomous,
                ..
            } => {
                if let Some(markers) = &self.markers {
                    markers.hide(&mut self.world);
                    self.dirty.set();
                }
            }
            GameEvent::CursorMoved { player, x, y } => {
                if let Some(markers) = &self.markers {
                    markers.place(&mut self.world, self.board.layout(), player, x, y);
                }
                self.dirty.set();
            }
            GameEvent::MoveProposed { source, mv } => {
                let stage = Stage {
                    world: &mut self.world,
                    board: &mut self.board,
                    dirty: &mut self.dirty,
                };
                let followups = self
                    .orchestrator
                    .on_move_proposed(source, mv, stage, self.frame)?;
                for next in followups {
                    self.dispatch(next)?;
                }
            }
            GameEvent::TurnBegan { .. } | GameEvent::MoveApplied(_) | GameEvent::GameOver(_) => {}
        }
        Ok(())
    }

    pub fn state(&self) -> &S {
        self.orchestrator.state()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn phase(&self) -> TurnPhase {
        self.orchestrator.phase()
    }

    pub fn active_player(&self) -> Option<PlayerIndex> {
        self.orchestrator.active_player()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.orchestrator.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn turns_taken(&self) -> u64 {
        self.orchestrator.turns_taken()
    }

    pub fn player(&self, index: PlayerIndex) -> Option<&Player<S>> {
        self.orchestrator.player(index)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn board(&self) -> &BoardRegistry {
        &self.board
    }

    pub fn cursor_markers(&self) -> Option<&CursorMarkers> {
        self.markers.as_ref()
    }

    /// Last composed frame.
    pub fn surface(&self) -> &Surface {
        self.render.surface()
    }

    pub fn compositions(&self) -> u64 {
        self.render.compositions()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_set()
    }
}
