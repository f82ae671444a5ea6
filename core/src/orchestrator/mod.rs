//! Simulation driver - event-processing loop and configuration.
//!
//! See `engine.rs` for the full implementation.

pub mod engine;

pub use engine::{
    Simulation, SimulationConfig, SimulationError, DEFAULT_WAITING_ROOM_CAPACITY,
};
