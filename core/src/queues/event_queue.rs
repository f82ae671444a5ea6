//! Time-ordered event scheduler.
//!
//! A bounded binary min-heap keyed on `(time, insertion sequence)`. The
//! sequence number gives events with identical firing times a deterministic
//! FIFO order, so replays of the same input are bit-for-bit identical.
//!
//! The bound is small by construction: at most one pending arrival plus one
//! pending completion per server can coexist, so the driver sizes the queue
//! at `server_count + 1`.

use crate::models::{Event, EventKind};
use crate::queues::QueueError;

/// Heap entry pairing an event with its insertion sequence number.
#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    event: Event,
}

impl Entry {
    /// True if `self` fires before `other`: earlier time first, insertion
    /// order among exact time ties.
    fn fires_before(&self, other: &Entry) -> bool {
        if self.event.time != other.event.time {
            self.event.time < other.event.time
        } else {
            self.seq < other.seq
        }
    }
}

/// Bounded min-heap of pending events, ordered by firing time.
///
/// # Example
/// ```
/// use teller_sim_core::{ArrivalRecord, Event, EventKind, EventQueue};
///
/// let mut queue = EventQueue::new(4);
/// queue.add(Event::arrival(&ArrivalRecord::new(5.0, 1.0, 1))).unwrap();
/// queue.add(Event::arrival(&ArrivalRecord::new(2.0, 1.0, 1))).unwrap();
///
/// assert_eq!(queue.peek_kind(), Some(EventKind::Arrival));
/// assert_eq!(queue.remove_min().unwrap().time, 2.0);
/// assert_eq!(queue.remove_min().unwrap().time, 5.0);
/// assert!(queue.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct EventQueue {
    entries: Vec<Entry>,
    capacity: usize,
    next_seq: u64,
}

impl EventQueue {
    /// Create an empty queue with the given fixed capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            next_seq: 0,
        }
    }

    /// Insert an event, restoring heap order by sifting up.
    ///
    /// Correct callers never exceed the bound; an overflow signals a driver
    /// bug and is reported as [`QueueError::CapacityExceeded`].
    pub fn add(&mut self, event: Event) -> Result<(), QueueError> {
        if self.entries.len() >= self.capacity {
            return Err(QueueError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        self.entries.push(Entry { seq, event });
        self.sift_up(self.entries.len() - 1);
        Ok(())
    }

    /// Remove and return the earliest-firing event.
    ///
    /// The root is replaced by the last element and heap order restored by
    /// sifting down against the earlier-firing child.
    pub fn remove_min(&mut self) -> Result<Event, QueueError> {
        if self.entries.is_empty() {
            return Err(QueueError::Empty);
        }

        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let entry = self.entries.pop().ok_or(QueueError::Empty)?;
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Ok(entry.event)
    }

    /// Kind of the earliest-firing event without removing it.
    pub fn peek_kind(&self) -> Option<EventKind> {
        self.entries.first().map(|entry| entry.event.kind)
    }

    /// Check if the queue holds no events.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Fixed capacity of the queue.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn sift_up(&mut self, start: usize) {
        let mut current = start;
        while current > 0 {
            let parent = (current - 1) / 2;
            if self.entries[current].fires_before(&self.entries[parent]) {
                self.entries.swap(current, parent);
                current = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, start: usize) {
        let len = self.entries.len();
        let mut current = start;
        loop {
            let mut child = 2 * current + 1;
            if child >= len {
                break;
            }
            // Compare against the earlier-firing child.
            if child + 1 < len && self.entries[child + 1].fires_before(&self.entries[child]) {
                child += 1;
            }
            if self.entries[child].fires_before(&self.entries[current]) {
                self.entries.swap(current, child);
                current = child;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArrivalRecord;

    fn arrival_at(time: f64) -> Event {
        Event::arrival(&ArrivalRecord::new(time, 1.0, 1))
    }

    #[test]
    fn test_removals_are_time_ordered() {
        let mut queue = EventQueue::new(8);
        for time in [4.0, 1.0, 3.0, 2.0, 5.0] {
            queue.add(arrival_at(time)).unwrap();
        }

        let mut last = f64::NEG_INFINITY;
        while let Ok(event) = queue.remove_min() {
            assert!(event.time >= last);
            last = event.time;
        }
        assert_eq!(last, 5.0);
    }

    #[test]
    fn test_capacity_exceeded_is_an_error() {
        let mut queue = EventQueue::new(2);
        queue.add(arrival_at(1.0)).unwrap();
        queue.add(arrival_at(2.0)).unwrap();

        assert_eq!(
            queue.add(arrival_at(3.0)),
            Err(QueueError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_remove_from_empty_is_an_error() {
        let mut queue = EventQueue::new(2);
        assert_eq!(queue.remove_min().unwrap_err(), QueueError::Empty);
    }

    #[test]
    fn test_peek_kind_does_not_consume() {
        let mut queue = EventQueue::new(2);
        assert_eq!(queue.peek_kind(), None);

        queue.add(arrival_at(1.0)).unwrap();
        assert_eq!(queue.peek_kind(), Some(EventKind::Arrival));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_equal_times_come_out_in_insertion_order() {
        let mut queue = EventQueue::new(4);
        let mut ids = Vec::new();
        for _ in 0..4 {
            let event = arrival_at(7.0);
            ids.push(event.customer_id.clone());
            queue.add(event).unwrap();
        }

        for expected in &ids {
            assert_eq!(&queue.remove_min().unwrap().customer_id, expected);
        }
    }
}
