// src/monitor/state.rs

//! Notification-gating state machine for one watched target.
//!
//! An alert fires on a rising edge of the availability verdict (not open on
//! the previous observation, open now). After an alert the state sits in a
//! fixed-length cool-down: polling continues and the verdict is still
//! recorded, but nothing fires until the timer runs out, whatever the seats
//! do in between.

use std::time::Duration;

use tokio::time::Instant;

/// Gating phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Armed; an open observation after a not-open one fires
    Waiting,
    /// Suppressing alerts until the deadline passes
    Cooldown { until: Instant },
}

/// What to do with the current observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Emit a notification now
    Notify,
    /// Nothing to emit this cycle
    Hold,
}

/// Per-target alert state. Fetch failures must not be fed in here; a failed
/// cycle carries no new information and leaves the state untouched.
#[derive(Debug)]
pub struct WatchState {
    phase: Phase,
    last_open: bool,
    cooldown: Duration,
}

impl WatchState {
    /// Fresh state, as after process start: armed, seats presumed taken.
    pub fn new(cooldown: Duration) -> Self {
        Self {
            phase: Phase::Waiting,
            last_open: false,
            cooldown,
        }
    }

    /// Whether alerts are currently suppressed.
    pub fn in_cooldown(&self, now: Instant) -> bool {
        matches!(self.phase, Phase::Cooldown { until } if now < until)
    }

    /// Record one availability verdict and decide whether to notify.
    pub fn observe(&mut self, open: bool, now: Instant) -> Decision {
        if let Phase::Cooldown { until } = self.phase {
            if now < until {
                self.last_open = open;
                return Decision::Hold;
            }
            // The timer expires regardless of current seat state
            self.phase = Phase::Waiting;
        }

        let rising = open && !self.last_open;
        self.last_open = open;

        if rising {
            self.phase = Phase::Cooldown {
                until: now + self.cooldown,
            };
            Decision::Notify
        } else {
            Decision::Hold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_secs(35);

    fn at(start: Instant, secs: u64) -> Instant {
        start + Duration::from_secs(secs)
    }

    #[test]
    fn test_no_alert_while_full() {
        let start = Instant::now();
        let mut state = WatchState::new(COOLDOWN);
        assert_eq!(state.observe(false, at(start, 0)), Decision::Hold);
        assert_eq!(state.observe(false, at(start, 5)), Decision::Hold);
    }

    #[test]
    fn test_alert_on_first_open_observation() {
        let start = Instant::now();
        let mut state = WatchState::new(COOLDOWN);
        assert_eq!(state.observe(true, at(start, 0)), Decision::Notify);
    }

    #[test]
    fn test_alert_once_then_cooldown() {
        let start = Instant::now();
        let mut state = WatchState::new(COOLDOWN);
        assert_eq!(state.observe(false, at(start, 0)), Decision::Hold);
        assert_eq!(state.observe(true, at(start, 5)), Decision::Notify);
        assert!(state.in_cooldown(at(start, 10)));
        // Still open during cool-down: suppressed
        assert_eq!(state.observe(true, at(start, 10)), Decision::Hold);
        assert_eq!(state.observe(true, at(start, 15)), Decision::Hold);
    }

    #[test]
    fn test_still_open_after_cooldown_does_not_realert() {
        let start = Instant::now();
        let mut state = WatchState::new(COOLDOWN);
        assert_eq!(state.observe(true, at(start, 0)), Decision::Notify);
        assert_eq!(state.observe(true, at(start, 30)), Decision::Hold);
        // Cool-down over, seats never closed: no second alert
        assert!(!state.in_cooldown(at(start, 40)));
        assert_eq!(state.observe(true, at(start, 40)), Decision::Hold);
        assert_eq!(state.observe(true, at(start, 45)), Decision::Hold);
    }

    #[test]
    fn test_realert_after_close_and_reopen() {
        let start = Instant::now();
        let mut state = WatchState::new(COOLDOWN);
        assert_eq!(state.observe(true, at(start, 0)), Decision::Notify);
        // Window closes after cool-down, then reopens
        assert_eq!(state.observe(false, at(start, 40)), Decision::Hold);
        assert_eq!(state.observe(true, at(start, 45)), Decision::Notify);
    }

    #[test]
    fn test_flap_inside_cooldown_is_suppressed() {
        let start = Instant::now();
        let mut state = WatchState::new(COOLDOWN);
        assert_eq!(state.observe(true, at(start, 0)), Decision::Notify);
        // Closed then open again, all inside the suppression window
        assert_eq!(state.observe(false, at(start, 10)), Decision::Hold);
        assert_eq!(state.observe(true, at(start, 20)), Decision::Hold);
        // After expiry the last verdict was open, so still no edge
        assert_eq!(state.observe(true, at(start, 40)), Decision::Hold);
    }

    #[test]
    fn test_cooldown_expiry_rearms_at_boundary() {
        let start = Instant::now();
        let mut state = WatchState::new(COOLDOWN);
        assert_eq!(state.observe(true, at(start, 0)), Decision::Notify);
        assert_eq!(state.observe(false, at(start, 30)), Decision::Hold);
        // Exactly at the deadline the cool-down is over
        assert!(!state.in_cooldown(at(start, 35)));
        assert_eq!(state.observe(true, at(start, 35)), Decision::Notify);
    }
}
