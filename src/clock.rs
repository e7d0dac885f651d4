/// Fixed-timestep simulation clock.
///
/// Wall-clock time is accumulated and converted into whole simulation ticks,
/// so fire and spawn periods stay tied to tick counts no matter how fast the
/// front end renders.

use std::time::{Duration, Instant};

use log::debug;

#[derive(Clone, Debug)]
pub struct FixedTimestep {
    step: Duration,
    max_steps: u32,
    accumulator: Duration,
    last: Instant,
}

impl FixedTimestep {
    /// A clock that starts accumulating at `now`.  The first call to
    /// `advance` always yields one tick so a frame is simulated immediately.
    pub fn new(step: Duration, max_steps: u32, now: Instant) -> Self {
        Self {
            step,
            max_steps: max_steps.max(1),
            accumulator: step,
            last: now,
        }
    }

    /// Number of ticks to simulate for the time elapsed up to `now`.
    ///
    /// At most `max_steps` ticks are returned; any backlog beyond that is
    /// dropped so a stalled terminal does not fast-forward the game.
    pub fn advance(&mut self, now: Instant) -> u32 {
        self.accumulator += now.saturating_duration_since(self.last);
        self.last = now;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if self.accumulator >= self.step {
            debug!("clock dropped {:?} of backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        steps
    }

    /// Time left until the next tick is due.
    pub fn until_next(&self, now: Instant) -> Duration {
        let pending = self.accumulator + now.saturating_duration_since(self.last);
        self.step.saturating_sub(pending)
    }

    pub fn step(&self) -> Duration {
        self.step
    }
}
