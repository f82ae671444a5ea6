//! Simulation event type.
//!
//! A single `Event` represents one customer as it moves through the system.
//! The same record is reused across its lifecycle: it enters the event queue
//! as an `Arrival`, is parked in the waiting room, and is converted in place
//! into a `Completion` when a server picks it up. At any instant a customer
//! is held by exactly one container — the event queue ("scheduled") or the
//! arrival queue ("waiting") — and only the simulation driver moves it
//! between the two.

use serde::{Deserialize, Serialize};

use crate::models::record::ArrivalRecord;

/// Kind of a scheduled occurrence.
///
/// The display label matches the original report vocabulary: an `Arrival`
/// prints as `"arrival"`, a `Completion` as `"service"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Customer enters the system.
    Arrival,
    /// Customer finishes service and frees its server.
    Completion,
}

impl EventKind {
    /// Human-readable label used in traces and reports.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Arrival => "arrival",
            EventKind::Completion => "service",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One scheduled occurrence in the simulation.
///
/// # Field validity
///
/// * `entered_queue_at` is meaningful only after the arrival has been
///   processed by the driver.
/// * `queue_wait` is meaningful only once the customer begins service.
/// * `assigned_server` is `Some` only for `Completion` events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Arrival or service completion.
    pub kind: EventKind,

    /// Absolute simulation time at which the event fires (event-queue key).
    pub time: f64,

    /// Original time the customer entered the system. Immutable once set.
    pub arrival_time: f64,

    /// Service time this customer requires.
    pub service_duration: f64,

    /// Time the customer was placed in the waiting room.
    pub entered_queue_at: f64,

    /// Priority class; higher values are served first (waiting-room key).
    pub priority: i32,

    /// Time spent waiting before service began.
    pub queue_wait: f64,

    /// Index of the server handling this customer, once assigned.
    pub assigned_server: Option<usize>,

    /// Stable customer identifier, assigned when the input record is read.
    pub customer_id: String,
}

impl Event {
    /// Create a fresh arrival event from an input record.
    ///
    /// The event fires at the customer's arrival time; wait-related fields
    /// start zeroed and are filled in by the driver as the customer moves
    /// through the system.
    pub fn arrival(record: &ArrivalRecord) -> Self {
        Self {
            kind: EventKind::Arrival,
            time: record.arrival_time,
            arrival_time: record.arrival_time,
            service_duration: record.service_duration,
            entered_queue_at: 0.0,
            priority: record.priority,
            queue_wait: 0.0,
            assigned_server: None,
            customer_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}
