//! Fixed pool of interchangeable servers with round-robin assignment.
//!
//! Each slot tracks busy/idle status, customers served, cumulative idle time,
//! and the time it last finished (or will finish) a job. State is mutated
//! only through [`ServerPool::assign`] and [`ServerPool::release`]; no other
//! component reads or writes slot status directly.
//!
//! Round-robin was chosen over least-recently-idle: O(1) amortized per
//! assignment with approximately even load, without tracking per-server wait
//! ordering. Exact fairness is not guaranteed under contention.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by the server pool.
///
/// Every variant signals a violated driver contract, not a simulation
/// condition: the driver must check [`ServerPool::has_idle`] before
/// assigning, and must only release servers it previously assigned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// `assign` was called while every server was busy.
    #[error("assign called with no idle server available")]
    NoIdleServer,

    /// `release` was called while no server was busy.
    #[error("release called with no busy server")]
    NoBusyServer,

    /// `release` named a server index outside the pool.
    #[error("unknown server index {0}")]
    UnknownServer(usize),

    /// `release` named a server that is already idle.
    #[error("server {0} is not busy")]
    ServerNotBusy(usize),
}

/// Busy/idle status of one server slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum Status {
    Busy,
    Idle,
}

/// Per-slot accounting record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerState {
    status: Status,
    served: usize,
    idle_time: f64,
    last_finish: f64,
}

impl ServerState {
    fn new() -> Self {
        Self {
            status: Status::Idle,
            served: 0,
            idle_time: 0.0,
            last_finish: 0.0,
        }
    }
}

/// Fixed-size pool of identical servers.
///
/// # Example
/// ```
/// use teller_sim_core::ServerPool;
///
/// let mut pool = ServerPool::new(2);
/// assert!(pool.has_idle());
///
/// let first = pool.assign(0.0, 5.0).unwrap();
/// let second = pool.assign(0.0, 3.0).unwrap();
/// assert_ne!(first, second);
/// assert!(!pool.has_idle());
///
/// pool.release(first).unwrap();
/// assert!(pool.has_idle());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerPool {
    servers: Vec<ServerState>,
    busy_count: usize,
    next_server: usize,
}

impl ServerPool {
    /// Create a pool of `count` idle servers with zeroed accounting.
    pub fn new(count: usize) -> Self {
        Self {
            servers: vec![ServerState::new(); count],
            busy_count: 0,
            next_server: 0,
        }
    }

    /// Assign the next idle server, round-robin, to a job starting at
    /// `start_time` and lasting `duration`.
    ///
    /// The scan begins at the round-robin cursor and cycles modulo the pool
    /// size. On the chosen server: the served count is incremented, the gap
    /// since it last finished (`start_time - last_finish`) is added to its
    /// idle time, `last_finish` becomes `start_time + duration`, and the
    /// slot is marked busy. The cursor then advances past the chosen slot.
    ///
    /// # Errors
    ///
    /// [`PoolError::NoIdleServer`] if every server is busy — callers must
    /// check [`Self::has_idle`] first.
    pub fn assign(&mut self, start_time: f64, duration: f64) -> Result<usize, PoolError> {
        if self.busy_count >= self.servers.len() {
            return Err(PoolError::NoIdleServer);
        }

        let mut cursor = self.next_server;
        for _ in 0..self.servers.len() {
            if self.servers[cursor].status == Status::Idle {
                break;
            }
            cursor = (cursor + 1) % self.servers.len();
        }
        let chosen = cursor;

        let server = &mut self.servers[chosen];
        server.served += 1;
        server.idle_time += start_time - server.last_finish;
        server.last_finish = start_time + duration;
        server.status = Status::Busy;

        self.busy_count += 1;
        self.next_server = (chosen + 1) % self.servers.len();

        Ok(chosen)
    }

    /// Mark the given server idle again.
    ///
    /// # Errors
    ///
    /// [`PoolError::NoBusyServer`] if nothing is busy,
    /// [`PoolError::UnknownServer`] for an out-of-range index, and
    /// [`PoolError::ServerNotBusy`] if that slot is already idle — all of
    /// which signal a driver bug.
    pub fn release(&mut self, server: usize) -> Result<(), PoolError> {
        if self.busy_count == 0 {
            return Err(PoolError::NoBusyServer);
        }
        if server >= self.servers.len() {
            return Err(PoolError::UnknownServer(server));
        }
        if self.servers[server].status != Status::Busy {
            return Err(PoolError::ServerNotBusy(server));
        }

        self.servers[server].status = Status::Idle;
        self.busy_count -= 1;
        Ok(())
    }

    /// Check if at least one server is idle.
    pub fn has_idle(&self) -> bool {
        self.busy_count != self.servers.len()
    }

    /// Number of servers in the pool.
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    /// Check if the pool has no servers.
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Number of currently busy servers.
    pub fn busy_count(&self) -> usize {
        self.busy_count
    }

    /// Customers served by server `i` so far.
    pub fn served_count(&self, i: usize) -> usize {
        self.servers[i].served
    }

    /// Cumulative time server `i` has stood idle between jobs.
    pub fn idle_time(&self, i: usize) -> f64 {
        self.servers[i].idle_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pool_starts_idle() {
        let pool = ServerPool::new(3);
        assert!(pool.has_idle());
        assert_eq!(pool.busy_count(), 0);
        for i in 0..3 {
            assert_eq!(pool.served_count(i), 0);
            assert_eq!(pool.idle_time(i), 0.0);
        }
    }

    #[test]
    fn test_round_robin_cycles_through_servers() {
        let mut pool = ServerPool::new(3);
        let a = pool.assign(0.0, 1.0).unwrap();
        let b = pool.assign(0.0, 1.0).unwrap();
        let c = pool.assign(0.0, 1.0).unwrap();
        assert_eq!((a, b, c), (0, 1, 2));
    }

    #[test]
    fn test_assign_skips_busy_servers() {
        let mut pool = ServerPool::new(3);
        pool.assign(0.0, 10.0).unwrap(); // server 0, busy until 10
        pool.assign(0.0, 1.0).unwrap(); // server 1
        pool.release(1).unwrap();

        // Cursor is at 2; server 2 is idle and is chosen directly.
        assert_eq!(pool.assign(1.0, 1.0).unwrap(), 2);
        // Cursor wraps to 0, which is busy; the scan lands on 1.
        assert_eq!(pool.assign(1.0, 1.0).unwrap(), 1);
    }

    #[test]
    fn test_idle_time_accumulates_gaps_between_jobs() {
        let mut pool = ServerPool::new(1);

        pool.assign(2.0, 3.0).unwrap(); // idle 0 -> 2, finishes at 5
        assert_eq!(pool.idle_time(0), 2.0);

        pool.release(0).unwrap();
        pool.assign(7.0, 1.0).unwrap(); // idle 5 -> 7
        assert_eq!(pool.idle_time(0), 4.0);
    }

    #[test]
    fn test_assign_with_all_busy_is_an_error() {
        let mut pool = ServerPool::new(1);
        pool.assign(0.0, 1.0).unwrap();
        assert_eq!(pool.assign(1.0, 1.0), Err(PoolError::NoIdleServer));
    }

    #[test]
    fn test_release_contract_violations() {
        let mut pool = ServerPool::new(2);
        assert_eq!(pool.release(0), Err(PoolError::NoBusyServer));

        pool.assign(0.0, 1.0).unwrap();
        assert_eq!(pool.release(5), Err(PoolError::UnknownServer(5)));
        assert_eq!(pool.release(1), Err(PoolError::ServerNotBusy(1)));
        assert_eq!(pool.release(0), Ok(()));
    }
}
