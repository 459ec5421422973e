//! One-second countdown.
//!
//! The timer has no thread or clock of its own: whoever owns it calls
//! `tick()` once per elapsed second. Each call returns the new remaining
//! value, and the tick that reaches zero is marked final. That final tick
//! is the completion signal and is delivered exactly once per run.
//!
//! ```text
//! start(3) -> 3
//! tick()   -> 2
//! tick()   -> 1
//! tick()   -> 0 (final)
//! tick()   -> None
//! ```

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// One countdown update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    pub remaining_secs: u32,
    pub total_secs: u32,
    /// Set on the tick that reaches zero.
    pub finished: bool,
}

impl Tick {
    /// 0.0 .. 1.0 elapsed fraction.
    pub fn progress(&self) -> f64 {
        progress_fraction(self.total_secs, self.remaining_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Countdown {
    total_secs: u32,
    remaining_secs: u32,
}

/// Countdown with at most one live run.
#[derive(Debug, Clone, Default)]
pub struct IntervalTimer {
    active: Option<Countdown>,
    /// Incremented on every `start`, so callers can tell runs apart.
    run: u64,
}

impl IntervalTimer {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn run_id(&self) -> u64 {
        self.run
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        self.active.map(|c| c.remaining_secs)
    }

    pub fn total_secs(&self) -> Option<u32> {
        self.active.map(|c| c.total_secs)
    }

    /// Elapsed fraction of the live run, 0.0 when idle.
    pub fn progress(&self) -> f64 {
        self.active
            .map(|c| progress_fraction(c.total_secs, c.remaining_secs))
            .unwrap_or(0.0)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a new run and return the initial tick (full duration).
    ///
    /// Any live run is cancelled first; its completion will never be
    /// reported.
    pub fn start(&mut self, duration: NonZeroU32) -> Tick {
        let duration_secs = duration.get();
        if self.active.is_some() {
            tracing::debug!(run = self.run, "replacing live countdown");
            self.cancel();
        }
        self.run = self.run.wrapping_add(1);
        self.active = Some(Countdown {
            total_secs: duration_secs,
            remaining_secs: duration_secs,
        });
        Tick {
            remaining_secs: duration_secs,
            total_secs: duration_secs,
            finished: false,
        }
    }

    /// Advance by one second. Returns `None` when no run is live.
    pub fn tick(&mut self) -> Option<Tick> {
        let countdown = self.active.as_mut()?;
        countdown.remaining_secs = countdown.remaining_secs.saturating_sub(1);
        let tick = Tick {
            remaining_secs: countdown.remaining_secs,
            total_secs: countdown.total_secs,
            finished: countdown.remaining_secs == 0,
        };
        if tick.finished {
            self.active = None;
        }
        Some(tick)
    }

    /// Stop the live run, if any. Returns whether a run was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }
}

/// `(total - remaining) / total`, clamped to [0, 1].
pub fn progress_fraction(total_secs: u32, remaining_secs: u32) -> f64 {
    if total_secs == 0 {
        return 0.0;
    }
    let elapsed = f64::from(total_secs) - f64::from(remaining_secs);
    (elapsed / f64::from(total_secs)).clamp(0.0, 1.0)
}
