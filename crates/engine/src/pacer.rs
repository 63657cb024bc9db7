use std::time::{Duration, Instant};

/// Keeps at least `interval` between the end of one tick and the start of
/// the next. Never catches up on late ticks.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    last: Option<Instant>,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left before the next tick may start, measured from the end of
    /// the previous one.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Sleep out the rest of the interval.
    pub fn wait(&self) {
        let rest = self.remaining(Instant::now());
        if !rest.is_zero() {
            std::thread::sleep(rest);
        }
    }

    /// Stamp the end of a tick.
    pub fn end_tick(&mut self) {
        self.mark(Instant::now());
    }

    pub fn mark(&mut self, now: Instant) {
        self.last = Some(now);
    }
}
