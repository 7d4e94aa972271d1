//! Per-question countdown.
//!
//! The countdown owns no thread or task. Whoever drives the UI calls
//! [`Countdown::tick`] once per second while a question is on screen.

/// Seconds allowed per question.
pub const QUESTION_SECONDS: i64 = 30;

/// Marker returned by [`Countdown::tick`] on the tick that reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expired;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    duration: u32,
    remaining: Option<u32>,
    armed: bool,
}

impl Countdown {
    /// Negative durations clamp to zero.
    #[must_use]
    pub fn new(duration_secs: i64) -> Self {
        let duration = u32::try_from(duration_secs.max(0)).unwrap_or(u32::MAX);
        Self {
            duration,
            remaining: None,
            armed: false,
        }
    }

    #[must_use]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Reset to the full duration and start counting.
    pub fn start(&mut self) {
        self.remaining = Some(self.duration);
        self.armed = true;
    }

    /// Stop counting; the remaining value stays visible.
    pub fn stop(&mut self) {
        self.armed = false;
    }

    /// Disarm and forget the remaining value, as if never started.
    pub fn reset(&mut self) {
        self.armed = false;
        self.remaining = None;
    }

    /// Advance by one second.
    ///
    /// Returns `Some(Expired)` exactly once, on the tick that reaches zero. A
    /// zero-length countdown expires on its first tick.
    pub fn tick(&mut self) -> Option<Expired> {
        if !self.armed {
            return None;
        }
        let remaining = self.remaining.unwrap_or(self.duration);
        let next = remaining.saturating_sub(1);
        self.remaining = Some(next);
        if next == 0 {
            self.armed = false;
            return Some(Expired);
        }
        None
    }

    /// `None` until the countdown has been started once.
    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.armed
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(QUESTION_SECONDS)
    }
}
