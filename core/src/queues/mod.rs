//! Bounded heap containers driving the simulation.
//!
//! Two heaps make up the scheduling core:
//!
//! - [`EventQueue`] — min-heap on event time; the scheduler of pending
//!   arrivals and service completions.
//! - [`ArrivalQueue`] — max-heap on customer priority with FIFO tie-break;
//!   the waiting room for customers not yet assigned a server.
//!
//! Both are explicitly bounded. Exceeding a bound is a violated caller
//! contract, not an expected runtime condition, so `add` reports it as
//! [`QueueError::CapacityExceeded`] and leaves the decision to the driver
//! instead of terminating the process.

pub mod arrival_queue;
pub mod event_queue;

pub use arrival_queue::ArrivalQueue;
pub use event_queue::EventQueue;

use thiserror::Error;

/// Errors reported by the bounded heap containers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// An `add` would grow the container past its fixed bound.
    #[error("queue capacity of {capacity} exceeded")]
    CapacityExceeded { capacity: usize },

    /// A removal was attempted on an empty container.
    #[error("remove from empty queue")]
    Empty,
}
