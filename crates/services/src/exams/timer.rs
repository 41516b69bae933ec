//! Countdown task for the exam clock.
//!
//! There is no wall clock in here: the host schedules a 1 Hz tick and
//! forwards it, so tests drive expiry synchronously.

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// The countdown is not armed; nothing was decremented.
    Idle,
    /// One second elapsed; this much remains.
    Running(i64),
    /// The budget ran out on this tick; the countdown disarmed itself.
    Expired,
}

/// One-shot countdown with pause/resume via disarm/arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: i64,
    armed: bool,
}

impl Countdown {
    #[must_use]
    pub fn new(total: i64) -> Self {
        Self {
            remaining: total,
            armed: false,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Start (or resume) ticking. Idempotent.
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Pause without touching the remaining budget. Idempotent.
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Replace the budget and stop ticking (fresh paper).
    pub fn reset(&mut self, total: i64) {
        self.remaining = total;
        self.armed = false;
    }

    /// Advance the countdown by one second.
    ///
    /// A budget of N seconds expires on exactly the Nth armed tick.
    pub fn tick(&mut self) -> TimerTick {
        if !self.armed {
            return TimerTick::Idle;
        }
        self.remaining -= 1;
        if self.remaining <= 0 {
            self.armed = false;
            TimerTick::Expired
        } else {
            TimerTick::Running(self.remaining)
        }
    }
}
