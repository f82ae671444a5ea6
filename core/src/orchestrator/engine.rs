//! Simulation driver - central event-processing loop.
//!
//! The driver owns the three core structures and moves customers between
//! them:
//!
//! ```text
//! For each event extracted from the event queue (time order):
//!   Completion: accumulate stats, release the server,
//!               promote the waiting-room head if any
//!   Arrival:    park the customer in the waiting room,
//!               promote the waiting-room head if a server is idle,
//!               schedule the next input arrival
//! ```
//!
//! "Waiting" is purely membership in the arrival queue; nothing blocks and
//! nothing runs concurrently. The loop terminates when the input is
//! exhausted and the event queue has drained. Invariant breaches inside the
//! data structures surface as errors; the driver aborts the run with a
//! diagnostic naming the violated invariant rather than letting any
//! component terminate the process.

use thiserror::Error;

use crate::arrivals::{ArrivalError, ArrivalSource};
use crate::core::time::SimClock;
use crate::models::{Event, EventKind, TraceEvent, TraceLog};
use crate::queues::{ArrivalQueue, EventQueue, QueueError};
use crate::report::{ServerReport, SimulationReport};
use crate::servers::{PoolError, ServerPool};

/// Default bound on concurrently waiting customers.
pub const DEFAULT_WAITING_ROOM_CAPACITY: usize = 500;

/// Simulation configuration.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of servers in the pool. Must be positive.
    pub num_servers: usize,

    /// Bound on concurrently waiting customers. Must be positive.
    pub waiting_room_capacity: usize,

    /// Record every state transition in the trace log.
    pub trace: bool,

    /// Surface malformed input records as errors instead of treating them
    /// as end-of-input.
    pub strict_input: bool,
}

impl SimulationConfig {
    /// Configuration with the given server count and defaults elsewhere.
    pub fn new(num_servers: usize) -> Self {
        Self {
            num_servers,
            ..Self::default()
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_servers: 1,
            waiting_room_capacity: DEFAULT_WAITING_ROOM_CAPACITY,
            trace: false,
            strict_input: false,
        }
    }
}

/// Errors aborting a simulation run.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A bounded queue invariant was violated.
    #[error("queue invariant violated: {0}")]
    Queue(#[from] QueueError),

    /// A server-pool contract was violated.
    #[error("server pool contract violated: {0}")]
    Pool(#[from] PoolError),

    /// The input source failed (I/O error, or a malformed record under
    /// strict input).
    #[error("input failed: {0}")]
    Input(#[from] ArrivalError),

    /// A completion event carried no server assignment.
    #[error("completion event for customer {0} has no assigned server")]
    MissingAssignment(String),
}

/// The event-processing state machine.
///
/// # Example
///
/// ```
/// use teller_sim_core::arrivals::VecSource;
/// use teller_sim_core::{ArrivalRecord, Simulation, SimulationConfig};
///
/// let mut source = VecSource::new(vec![
///     ArrivalRecord::new(1.0, 2.0, 1),
///     ArrivalRecord::new(1.5, 1.0, 1),
/// ]);
///
/// let mut sim = Simulation::new(SimulationConfig::new(2)).unwrap();
/// let report = sim.run(&mut source).unwrap();
///
/// assert_eq!(report.customers_served, 2);
/// assert_eq!(report.total_time, 3.0);
/// ```
pub struct Simulation {
    event_queue: EventQueue,
    arrival_queue: ArrivalQueue,
    servers: ServerPool,
    clock: SimClock,

    trace_enabled: bool,
    strict_input: bool,
    trace: TraceLog,

    /// Whether the input may still yield arrivals.
    more_input: bool,

    // Running totals for the final report.
    customer_count: usize,
    total_service_time: f64,
    total_queue_wait: f64,
}

impl Simulation {
    /// Create a simulation from a validated configuration.
    ///
    /// The event queue is sized at `num_servers + 1`: at most one pending
    /// arrival and one pending completion per server can coexist.
    ///
    /// # Errors
    ///
    /// `SimulationError::InvalidConfig` if the server count or waiting-room
    /// capacity is zero.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        if config.num_servers == 0 {
            return Err(SimulationError::InvalidConfig(
                "num_servers must be positive".to_string(),
            ));
        }
        if config.waiting_room_capacity == 0 {
            return Err(SimulationError::InvalidConfig(
                "waiting_room_capacity must be positive".to_string(),
            ));
        }

        Ok(Self {
            event_queue: EventQueue::new(config.num_servers + 1),
            arrival_queue: ArrivalQueue::new(config.waiting_room_capacity),
            servers: ServerPool::new(config.num_servers),
            clock: SimClock::new(),
            trace_enabled: config.trace,
            strict_input: config.strict_input,
            trace: TraceLog::new(),
            more_input: true,
            customer_count: 0,
            total_service_time: 0.0,
            total_queue_wait: 0.0,
        })
    }

    /// Run the simulation to completion over the given input source.
    ///
    /// Seeds the first arrival, then consumes events in time order until the
    /// input is exhausted and the event queue is empty. A `Simulation` runs
    /// once; afterwards the report remains available via [`Self::report`].
    pub fn run(
        &mut self,
        source: &mut dyn ArrivalSource,
    ) -> Result<SimulationReport, SimulationError> {
        self.schedule_next_arrival(source)?;

        while let Some(kind) = self.event_queue.peek_kind() {
            match kind {
                EventKind::Completion => self.on_completion()?,
                EventKind::Arrival => self.on_arrival(source)?,
            }
        }

        Ok(self.report())
    }

    /// Statistics for the run so far.
    pub fn report(&self) -> SimulationReport {
        let servers = (0..self.servers.len())
            .map(|i| ServerReport {
                served: self.servers.served_count(i),
                idle_time: self.servers.idle_time(i),
            })
            .collect();

        SimulationReport {
            customers_served: self.customer_count,
            total_service_time: self.total_service_time,
            total_queue_wait: self.total_queue_wait,
            max_queue_length: self.arrival_queue.high_water_mark(),
            total_time: self.clock.now(),
            servers,
        }
    }

    /// Trace of state transitions (empty unless tracing was enabled).
    pub fn trace(&self) -> &TraceLog {
        &self.trace
    }

    /// Current simulation time.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// A service completion fired: free the server, account the customer,
    /// and promote the waiting-room head if anyone is waiting.
    fn on_completion(&mut self) -> Result<(), SimulationError> {
        let event = self.event_queue.remove_min()?;
        self.clock.advance_to(event.time);
        let now = self.clock.now();

        self.total_service_time += event.service_duration;
        self.total_queue_wait += event.queue_wait;

        let server = event
            .assigned_server
            .ok_or_else(|| SimulationError::MissingAssignment(event.customer_id.clone()))?;
        self.servers.release(server)?;

        if self.trace_enabled {
            self.trace.log(TraceEvent::ServiceCompleted {
                time: now,
                customer_id: event.customer_id,
                server,
            });
        }

        if !self.arrival_queue.is_empty() {
            self.start_service(now)?;
        }
        Ok(())
    }

    /// An arrival fired: park the customer in the waiting room, promote the
    /// head if a server is idle, and pull the next record from the input.
    fn on_arrival(
        &mut self,
        source: &mut dyn ArrivalSource,
    ) -> Result<(), SimulationError> {
        let mut event = self.event_queue.remove_min()?;
        self.clock.advance_to(event.time);
        let now = self.clock.now();

        event.entered_queue_at = now;

        if self.servers.has_idle() && self.arrival_queue.is_empty() {
            // Nobody is waiting and a server is free: the customer is served
            // on the spot and never occupies the waiting room.
            self.begin_service(event, now)?;
        } else {
            let traced = if self.trace_enabled {
                Some((event.customer_id.clone(), event.priority))
            } else {
                None
            };
            self.arrival_queue.add(event)?;
            if let Some((customer_id, priority)) = traced {
                self.trace.log(TraceEvent::CustomerQueued {
                    time: now,
                    customer_id,
                    priority,
                    queue_length: self.arrival_queue.len(),
                });
            }

            // The head promoted here may or may not be the customer who just
            // arrived; the waiting room decides by priority and tie-break.
            if self.servers.has_idle() {
                self.start_service(now)?;
            }
        }

        self.schedule_next_arrival(source)
    }

    /// Promote the waiting-room head to a server.
    fn start_service(&mut self, now: f64) -> Result<(), SimulationError> {
        let event = self.arrival_queue.remove_max()?;
        self.begin_service(event, now)
    }

    /// Convert a customer into a completion event in place and schedule it.
    fn begin_service(&mut self, mut event: Event, now: f64) -> Result<(), SimulationError> {
        event.kind = EventKind::Completion;
        event.queue_wait = now - event.entered_queue_at;
        event.time = now + event.service_duration;
        let server = self.servers.assign(now, event.service_duration)?;
        event.assigned_server = Some(server);

        if self.trace_enabled {
            self.trace.log(TraceEvent::ServiceStarted {
                time: now,
                customer_id: event.customer_id.clone(),
                server,
                queue_wait: event.queue_wait,
                completes_at: event.time,
            });
        }

        self.event_queue.add(event)?;
        Ok(())
    }

    /// Pull the next record from the input and schedule it as an arrival.
    ///
    /// A sentinel or exhausted stream stops further scheduling. Malformed
    /// records are treated as end-of-input unless `strict_input` is set, in
    /// which case they abort the run.
    fn schedule_next_arrival(
        &mut self,
        source: &mut dyn ArrivalSource,
    ) -> Result<(), SimulationError> {
        if !self.more_input {
            return Ok(());
        }

        let record = match source.next_record() {
            Ok(record) => record,
            Err(err @ ArrivalError::MalformedRecord { .. }) => {
                if self.strict_input {
                    return Err(err.into());
                }
                self.more_input = false;
                if self.trace_enabled {
                    self.trace.log(TraceEvent::MalformedInput {
                        time: self.clock.now(),
                        detail: err.to_string(),
                    });
                }
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        match record {
            Some(record) => {
                self.customer_count += 1;
                let event = Event::arrival(&record);
                if self.trace_enabled {
                    self.trace.log(TraceEvent::ArrivalScheduled {
                        time: self.clock.now(),
                        customer_id: event.customer_id.clone(),
                        service_duration: event.service_duration,
                        priority: event.priority,
                    });
                }
                self.event_queue.add(event)?;
            }
            None => {
                self.more_input = false;
                if self.trace_enabled {
                    self.trace.log(TraceEvent::InputEnded {
                        time: self.clock.now(),
                    });
                }
            }
        }
        Ok(())
    }
}
