//! Logical clocks driven by the frame delta
//!
//! The render tick runs once per frame. Two other things run on wall-clock
//! time: the obstacle spawn cadence and the expiry of timed pickup effects.
//! Both are plain records advanced by the frame's `dt`, so there are no
//! independent timer callbacks to leak across runs.

use crate::consts::SPAWN_INTERVAL;

/// Fixed-cadence clock for obstacle spawn attempts
#[derive(Debug, Clone)]
pub struct SpawnClock {
    pub interval: f32,
    accumulator: f32,
    running: bool,
}

impl Default for SpawnClock {
    fn default() -> Self {
        Self::new(SPAWN_INTERVAL)
    }
}

impl SpawnClock {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: 0.0,
            running: false,
        }
    }

    /// Start from a fresh cadence
    pub fn restart(&mut self) {
        self.accumulator = 0.0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.accumulator = 0.0;
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by `dt` seconds, returning how many attempts fired
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.running || self.interval <= 0.0 {
            return 0;
        }
        self.accumulator += dt.max(0.0);
        let mut fired = 0;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            fired += 1;
        }
        fired
    }
}

/// What happens when a deferred effect expires
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeferredAction {
    /// Shield visuals off
    EndShield,
    /// Put the scroll speed back to the captured value
    RestoreSpeed(f32),
}

/// A one-shot effect waiting for its deadline
#[derive(Debug, Clone, PartialEq)]
pub struct Deferred {
    pub remaining: f32,
    pub action: DeferredAction,
}

/// All wall-clock scheduled work
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pub spawn_clock: SpawnClock,
    pub deferred: Vec<Deferred>,
}

impl Scheduler {
    /// Queue an action to fire after `delay` seconds
    pub fn schedule(&mut self, delay: f32, action: DeferredAction) {
        self.deferred.push(Deferred {
            remaining: delay,
            action,
        });
    }

    /// Reset the deadline of the first queued action matching `pred`.
    /// Returns that action, or `None` when nothing matches.
    pub fn extend(
        &mut self,
        delay: f32,
        pred: impl Fn(&DeferredAction) -> bool,
    ) -> Option<DeferredAction> {
        let pending = self.deferred.iter_mut().find(|d| pred(&d.action))?;
        pending.remaining = delay;
        Some(pending.action)
    }

    /// Count down deferred effects; returns the ones that expired, in queue order
    pub fn advance_deferred(&mut self, dt: f32) -> Vec<DeferredAction> {
        let mut expired = Vec::new();
        self.deferred.retain_mut(|d| {
            d.remaining -= dt;
            if d.remaining <= 0.0 {
                expired.push(d.action);
                false
            } else {
                true
            }
        });
        expired
    }
}
