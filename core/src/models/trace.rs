//! Execution tracing for debugging and replay analysis.
//!
//! Every state transition the driver performs can be captured as a
//! `TraceEvent` and appended to a `TraceLog`. Tracing is purely
//! observational: it never influences control flow, and it is disabled by
//! default (see `SimulationConfig::trace`). This replaces the original
//! compile-time trace switch with data the caller can inspect, filter, or
//! serialize after the run.

use serde::{Deserialize, Serialize};

/// One traced state transition.
///
/// All variants carry the simulation time at which the transition happened
/// plus enough identifying detail to reconstruct the customer's path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceEvent {
    /// A new arrival was read from the input and scheduled.
    ArrivalScheduled {
        time: f64,
        customer_id: String,
        service_duration: f64,
        priority: i32,
    },

    /// An arrival fired and the customer entered the waiting room.
    CustomerQueued {
        time: f64,
        customer_id: String,
        priority: i32,
        queue_length: usize,
    },

    /// A waiting customer was promoted to a server.
    ServiceStarted {
        time: f64,
        customer_id: String,
        server: usize,
        queue_wait: f64,
        completes_at: f64,
    },

    /// A customer finished service and freed its server.
    ServiceCompleted {
        time: f64,
        customer_id: String,
        server: usize,
    },

    /// The input signalled end-of-input; no further arrivals are scheduled.
    InputEnded { time: f64 },

    /// A malformed input record was treated as end-of-input.
    MalformedInput { time: f64, detail: String },
}

impl TraceEvent {
    /// Simulation time at which the transition happened.
    pub fn time(&self) -> f64 {
        match self {
            TraceEvent::ArrivalScheduled { time, .. }
            | TraceEvent::CustomerQueued { time, .. }
            | TraceEvent::ServiceStarted { time, .. }
            | TraceEvent::ServiceCompleted { time, .. }
            | TraceEvent::InputEnded { time }
            | TraceEvent::MalformedInput { time, .. } => *time,
        }
    }

    /// Customer this transition concerns, if any.
    pub fn customer_id(&self) -> Option<&str> {
        match self {
            TraceEvent::ArrivalScheduled { customer_id, .. }
            | TraceEvent::CustomerQueued { customer_id, .. }
            | TraceEvent::ServiceStarted { customer_id, .. }
            | TraceEvent::ServiceCompleted { customer_id, .. } => Some(customer_id),
            TraceEvent::InputEnded { .. } | TraceEvent::MalformedInput { .. } => None,
        }
    }

    /// Short name of the variant, for filtering.
    pub fn kind(&self) -> &'static str {
        match self {
            TraceEvent::ArrivalScheduled { .. } => "arrival_scheduled",
            TraceEvent::CustomerQueued { .. } => "customer_queued",
            TraceEvent::ServiceStarted { .. } => "service_started",
            TraceEvent::ServiceCompleted { .. } => "service_completed",
            TraceEvent::InputEnded { .. } => "input_ended",
            TraceEvent::MalformedInput { .. } => "malformed_input",
        }
    }
}

/// Append-only log of traced transitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceLog {
    events: Vec<TraceEvent>,
}

impl TraceLog {
    /// Create a new empty trace log.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append a transition to the log.
    pub fn log(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// Number of transitions logged.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All logged transitions, in order.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Transitions of a specific kind (see `TraceEvent::kind`).
    pub fn events_of_kind(&self, kind: &str) -> Vec<&TraceEvent> {
        self.events.iter().filter(|e| e.kind() == kind).collect()
    }

    /// Transitions concerning a specific customer.
    pub fn events_for_customer(&self, customer_id: &str) -> Vec<&TraceEvent> {
        self.events
            .iter()
            .filter(|e| e.customer_id() == Some(customer_id))
            .collect()
    }
}
