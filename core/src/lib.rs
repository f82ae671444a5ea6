//! Teller Simulator Core - Rust Engine
//!
//! Discrete-event simulation of a multi-server queueing process: customers
//! arrive, wait by priority, are served by one of a pool of identical
//! servers, and utilization statistics are reported at the end of the run.
//!
//! # Architecture
//!
//! - **core**: Logical simulation clock
//! - **models**: Domain types (Event, ArrivalRecord, TraceLog)
//! - **queues**: Bounded heaps (event scheduler, priority waiting room)
//! - **servers**: Round-robin server pool
//! - **arrivals**: Input record sources
//! - **orchestrator**: Main event-processing loop
//! - **report**: Final statistics
//!
//! # Critical Invariants
//!
//! 1. Event times extracted from the scheduler are non-decreasing
//! 2. Equal-priority customers are served in arrival order
//! 3. Invariant breaches surface as errors; no component exits the process

// Module declarations
pub mod arrivals;
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod queues;
pub mod report;
pub mod servers;

// Re-exports for convenience
pub use crate::core::time::SimClock;
pub use arrivals::{ArrivalError, ArrivalSource, RecordReader, VecSource};
pub use models::{
    event::{Event, EventKind},
    record::ArrivalRecord,
    trace::{TraceEvent, TraceLog},
};
pub use orchestrator::{
    Simulation, SimulationConfig, SimulationError, DEFAULT_WAITING_ROOM_CAPACITY,
};
pub use queues::{ArrivalQueue, EventQueue, QueueError};
pub use report::{ServerReport, SimulationReport};
pub use servers::{PoolError, ServerPool};
