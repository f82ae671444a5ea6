//! Final simulation statistics.
//!
//! The driver aggregates raw totals into a [`SimulationReport`]; formatting
//! and printing live with the caller (see the CLI crate). The report is
//! serializable so runs can be exported for downstream analysis.

use serde::{Deserialize, Serialize};

/// Per-server utilization figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerReport {
    /// Customers served by this server.
    pub served: usize,

    /// Cumulative time this server stood idle between jobs.
    pub idle_time: f64,
}

/// Aggregate statistics for a completed run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Total customers scheduled from the input.
    pub customers_served: usize,

    /// Sum of service durations over all completed customers.
    pub total_service_time: f64,

    /// Sum of waiting-room time over all completed customers.
    pub total_queue_wait: f64,

    /// Maximum waiting-room occupancy observed.
    pub max_queue_length: usize,

    /// Simulation time at which the last event fired.
    pub total_time: f64,

    /// Per-server utilization, indexed by server.
    pub servers: Vec<ServerReport>,
}

impl SimulationReport {
    /// Average service time per customer, or zero for an empty run.
    pub fn avg_service_time(&self) -> f64 {
        if self.customers_served == 0 {
            0.0
        } else {
            self.total_service_time / self.customers_served as f64
        }
    }

    /// Average waiting time per customer, or zero for an empty run.
    pub fn avg_wait_time(&self) -> f64 {
        if self.customers_served == 0 {
            0.0
        } else {
            self.total_queue_wait / self.customers_served as f64
        }
    }

    /// Time-averaged waiting-room length (total wait over total time).
    pub fn avg_queue_length(&self) -> f64 {
        if self.total_time == 0.0 {
            0.0
        } else {
            self.total_queue_wait / self.total_time
        }
    }

    /// Fraction of the run server `i` stood idle, or `None` for an index
    /// outside the pool.
    pub fn idle_rate(&self, i: usize) -> Option<f64> {
        let server = self.servers.get(i)?;
        if self.total_time == 0.0 {
            Some(0.0)
        } else {
            Some(server.idle_time / self.total_time)
        }
    }
}
