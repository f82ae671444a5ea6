//! Logical simulation clock.
//!
//! The simulation runs on a pure logical clock: "now" is always the firing
//! time of the event most recently extracted from the event queue, and it
//! never runs ahead of the next scheduled event. This module provides the
//! clock with its monotonicity guarantee.

use serde::{Deserialize, Serialize};

/// Monotonic logical clock driven by extracted event times.
///
/// # Example
/// ```
/// use teller_sim_core::SimClock;
///
/// let mut clock = SimClock::new();
/// assert_eq!(clock.now(), 0.0);
///
/// clock.advance_to(3.5);
/// assert_eq!(clock.now(), 3.5);
///
/// // Advancing to an earlier time is a no-op; time never moves backwards.
/// clock.advance_to(1.0);
/// assert_eq!(clock.now(), 3.5);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimClock {
    now: f64,
}

impl SimClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self { now: 0.0 }
    }

    /// Current simulation time.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Advance the clock to `time`.
    ///
    /// Event times extracted from the scheduler are non-decreasing, so a
    /// target earlier than `now` is ignored rather than rewinding the clock.
    pub fn advance_to(&mut self, time: f64) {
        if time > self.now {
            self.now = time;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let clock = SimClock::new();
        assert_eq!(clock.now(), 0.0);
    }

    #[test]
    fn test_advances_monotonically() {
        let mut clock = SimClock::new();
        clock.advance_to(2.0);
        clock.advance_to(5.0);
        assert_eq!(clock.now(), 5.0);

        clock.advance_to(4.0);
        assert_eq!(clock.now(), 5.0);
    }
}
