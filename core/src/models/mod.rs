//! Domain types shared across the simulation core.

pub mod event;
pub mod record;
pub mod trace;

pub use event::{Event, EventKind};
pub use record::ArrivalRecord;
pub use trace::{TraceEvent, TraceLog};
