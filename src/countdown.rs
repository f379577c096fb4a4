use std::time::Duration;

const SECOND: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    /// A whole second elapsed and the round is still running
    Second { remaining: u32 },
    /// The round ran out of time; the timer is now disarmed
    Expired,
}

/// Per-question countdown. One instance per game; arming always replaces
/// whatever round was running before.
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    remaining: u32,
    armed: bool,
    carry: Duration,
    round: u64,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, secs: u32) {
        self.remaining = secs;
        self.armed = true;
        self.carry = Duration::ZERO;
        self.round += 1;
    }

    pub fn cancel(&mut self) {
        self.remaining = 0;
        self.armed = false;
        self.carry = Duration::ZERO;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Generation counter, bumped on every `arm`
    pub fn round(&self) -> u64 {
        self.round
    }

    /// One whole second
    pub fn tick(&mut self) -> Option<TimerSignal> {
        if !self.armed {
            return None;
        }
        if self.remaining <= 1 {
            self.cancel();
            return Some(TimerSignal::Expired);
        }
        self.remaining -= 1;
        Some(TimerSignal::Second {
            remaining: self.remaining,
        })
    }

    /// Feed real elapsed time; returns how many whole seconds are due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.armed {
            return 0;
        }
        self.carry += elapsed;
        let mut due = 0;
        while self.carry >= SECOND {
            self.carry -= SECOND;
            due += 1;
        }
        due
    }
}
