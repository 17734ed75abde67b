//! Countdown state machine for the focus timer.
//!
//! Three observable states: idle at the default duration, idle at zero
//! (a countdown just finished), and running. The machine is pure; the
//! session drives `tick` from a one-second interval and reacts to the
//! returned outcome.

/// Duration a fresh countdown starts from.
pub const DEFAULT_MINUTES: u8 = 45;

/// Upper bound for the scroll-adjustable duration.
pub const MAX_MINUTES: u8 = 60;

/// Result of advancing the countdown by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is not running; nothing changed.
    Idle,
    /// One second elapsed, countdown still going.
    Running,
    /// The countdown reached zero on this tick. Reported exactly once per
    /// reach-zero event: the machine stops itself, so later ticks are `Idle`.
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTimer {
    minutes: u8,
    seconds: u8,
    running: bool,
}

impl FocusTimer {
    pub fn new() -> Self {
        Self::with_minutes(DEFAULT_MINUTES)
    }

    pub fn with_minutes(minutes: u8) -> Self {
        Self {
            minutes: minutes.min(MAX_MINUTES),
            seconds: 0,
            running: false,
        }
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn is_spent(&self) -> bool {
        self.minutes == 0 && self.seconds == 0
    }

    /// Start or pause the countdown. Starting from 0:00 resets to the
    /// default duration first rather than running an empty countdown.
    pub fn toggle(&mut self) {
        if !self.running && self.is_spent() {
            self.minutes = DEFAULT_MINUTES;
            self.seconds = 0;
        }
        self.running = !self.running;
    }

    /// Retune the duration by whole minutes, clamped to [0, 60]. Seconds
    /// reset to zero so the display always lands on a round minute. Ignored
    /// while running.
    pub fn adjust(&mut self, delta: i32) {
        if self.running {
            return;
        }
        let minutes = i32::from(self.minutes).saturating_add(delta);
        self.minutes = minutes.clamp(0, i32::from(MAX_MINUTES)) as u8;
        self.seconds = 0;
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        if self.seconds > 0 {
            self.seconds -= 1;
            TickOutcome::Running
        } else if self.minutes > 0 {
            self.minutes -= 1;
            self.seconds = 59;
            TickOutcome::Running
        } else {
            self.running = false;
            TickOutcome::Completed
        }
    }

    /// Remaining time as a fraction of the 60-minute span, for the
    /// progress ring.
    pub fn remaining_fraction(&self) -> f32 {
        let remaining = u32::from(self.minutes) * 60 + u32::from(self.seconds);
        remaining as f32 / (u32::from(MAX_MINUTES) * 60) as f32
    }
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new()
    }
}
