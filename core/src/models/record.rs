//! Input record type for customer arrivals.

use serde::{Deserialize, Serialize};

/// One customer arrival read from the input stream: arrival time, required
/// service duration, and priority class, in that order.
///
/// A record where both `arrival_time` and `service_duration` are non-positive
/// is the end-of-input sentinel; the stream may remain open past it, but no
/// further customers are scheduled.
///
/// # Example
/// ```
/// use teller_sim_core::ArrivalRecord;
///
/// let record = ArrivalRecord::new(1.5, 3.0, 2);
/// assert!(!record.is_end_marker());
/// assert!(ArrivalRecord::new(0.0, 0.0, 0).is_end_marker());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrivalRecord {
    /// Time the customer enters the system.
    pub arrival_time: f64,

    /// Service time the customer requires.
    pub service_duration: f64,

    /// Priority class; higher values are served first.
    pub priority: i32,
}

impl ArrivalRecord {
    /// Create a new arrival record.
    pub fn new(arrival_time: f64, service_duration: f64, priority: i32) -> Self {
        Self {
            arrival_time,
            service_duration,
            priority,
        }
    }

    /// True if this record is the end-of-input sentinel.
    pub fn is_end_marker(&self) -> bool {
        self.arrival_time <= 0.0 && self.service_duration <= 0.0
    }
}
