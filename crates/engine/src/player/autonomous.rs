//! Autonomous players run their strategy on tokio's blocking pool.
//!
//! The scheduler thread never waits on a decision: it checks
//! `JoinHandle::is_finished` once per tick and only joins a finished task.
//! The strategy itself moves into the task and comes back with the answer.

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::core::{GameModel, Strategy};
use crate::error::EngineError;
use crate::events::GameEvent;
use crate::types::{Move, PlayerIndex};

type Decision<S> = (Box<dyn Strategy<S>>, Option<Move>);

/// Worker threads for decision procedures.
///
/// Dropping the pool does not wait for decisions still running; their
/// threads are left to finish on their own.
pub struct DecisionPool {
    rt: Option<Runtime>,
    handle: Handle,
}

impl DecisionPool {
    pub fn new(max_workers: usize) -> Result<Self, EngineError> {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(max_workers.max(1))
            .thread_name("corso-decision")
            .enable_time()
            .build()
            .map_err(EngineError::Runtime)?;
        let handle = rt.handle().clone();
        Ok(Self {
            rt: Some(rt),
            handle,
        })
    }

    pub fn handle(&self) -> Handle {
        self.handle.clone()
    }
}

impl Drop for DecisionPool {
    fn drop(&mut self) {
        if let Some(rt) = self.rt.take() {
            rt.shutdown_background();
        }
    }
}

pub struct AutonomousPlayer<S: GameModel> {
    name: String,
    runtime: Handle,
    strategy: Option<Box<dyn Strategy<S>>>,
    pending: Option<JoinHandle<Decision<S>>>,
}

impl<S: GameModel> AutonomousPlayer<S> {
    pub fn new(strategy: impl Strategy<S>, runtime: Handle) -> Self {
        Self::boxed(Box::new(strategy), runtime)
    }

    pub fn boxed(strategy: Box<dyn Strategy<S>>, runtime: Handle) -> Self {
        Self {
            name: strategy.name().to_string(),
            runtime,
            strategy: Some(strategy),
            pending: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }

    /// True once the outstanding decision has finished and awaits collection.
    pub fn computation_finished(&self) -> bool {
        self.pending.as_ref().is_some_and(JoinHandle::is_finished)
    }

    pub(crate) fn begin_turn(&mut self, index: PlayerIndex, state: &S) -> Result<(), EngineError> {
        if self.pending.is_some() {
            return Err(EngineError::invariant(format!(
                "player {index} asked to decide while a decision is outstanding"
            )));
        }
        let Some(mut strategy) = self.strategy.take() else {
            return Err(EngineError::DecisionFailed {
                player: index,
                reason: "strategy lost in an earlier failure".into(),
            });
        };

        let snapshot = state.clone();
        info!(player = index, strategy = %self.name, "decision started");
        self.pending = Some(self.runtime.spawn_blocking(move || {
            let mv = strategy.choose(&snapshot);
            (strategy, mv)
        }));
        Ok(())
    }

    pub(crate) fn poll(&mut self, index: PlayerIndex) -> Result<Option<GameEvent>, EngineError> {
        if !self.computation_finished() {
            return Ok(None);
        }
        let Some(task) = self.pending.take() else {
            return Ok(None);
        };

        match self.runtime.block_on(task) {
            Ok((strategy, Some(mv))) => {
                self.strategy = Some(strategy);
                debug!(player = index, %mv, "decision collected");
                Ok(Some(GameEvent::MoveProposed { source: index, mv }))
            }
            Ok((strategy, None)) => {
                self.strategy = Some(strategy);
                warn!(player = index, "strategy produced no move");
                Err(EngineError::DecisionFailed {
                    player: index,
                    reason: format!("{} produced no move", self.name),
                })
            }
            Err(e) => Err(EngineError::DecisionFailed {
                player: index,
                reason: e.to_string(),
            }),
        }
    }
}
