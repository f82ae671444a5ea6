//! Priority waiting room.
//!
//! A bounded binary max-heap over waiting customers. The comparator is
//! composite: priority descending, then arrival time ascending — among
//! equal-priority customers the one who arrived first is served first.
//!
//! The capacity is a generous upper bound on concurrently waiting customers
//! (the original used 500); overflowing it is reported to the caller rather
//! than aborting the process.

use crate::models::Event;
use crate::queues::QueueError;

/// Bounded max-heap of waiting customers, keyed on (priority desc,
/// arrival time asc).
#[derive(Debug, Clone)]
pub struct ArrivalQueue {
    waiting: Vec<Event>,
    capacity: usize,
    high_water: usize,
}

impl ArrivalQueue {
    /// Create an empty waiting room with the given fixed capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            waiting: Vec::with_capacity(capacity),
            capacity,
            high_water: 0,
        }
    }

    /// Insert a waiting customer, restoring heap order by sifting up.
    ///
    /// Updates the high-water mark on success.
    pub fn add(&mut self, event: Event) -> Result<(), QueueError> {
        if self.waiting.len() >= self.capacity {
            return Err(QueueError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        self.waiting.push(event);
        self.sift_up(self.waiting.len() - 1);
        self.high_water = self.high_water.max(self.waiting.len());
        Ok(())
    }

    /// Remove and return the customer to be served next.
    pub fn remove_max(&mut self) -> Result<Event, QueueError> {
        if self.waiting.is_empty() {
            return Err(QueueError::Empty);
        }

        let last = self.waiting.len() - 1;
        self.waiting.swap(0, last);
        let event = self.waiting.pop().ok_or(QueueError::Empty)?;
        if !self.waiting.is_empty() {
            self.sift_down(0);
        }
        Ok(event)
    }

    /// Check if no customers are waiting.
    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    /// Number of customers currently waiting.
    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    /// Fixed capacity of the waiting room.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Maximum number of customers ever waiting at once.
    ///
    /// Used only for reporting, never for control flow.
    pub fn high_water_mark(&self) -> usize {
        self.high_water
    }

    /// True if the customer at `a` is served before the one at `b`:
    /// higher priority first, earlier arrival among equals.
    fn ranks_before(&self, a: usize, b: usize) -> bool {
        let (a, b) = (&self.waiting[a], &self.waiting[b]);
        if a.priority != b.priority {
            a.priority > b.priority
        } else {
            a.arrival_time < b.arrival_time
        }
    }

    fn sift_up(&mut self, start: usize) {
        let mut current = start;
        while current > 0 {
            let parent = (current - 1) / 2;
            if self.ranks_before(current, parent) {
                self.waiting.swap(current, parent);
                current = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, start: usize) {
        let len = self.waiting.len();
        let mut current = start;
        loop {
            let mut child = 2 * current + 1;
            if child >= len {
                break;
            }
            // Compare against whichever child the comparator ranks higher.
            if child + 1 < len && self.ranks_before(child + 1, child) {
                child += 1;
            }
            if self.ranks_before(child, current) {
                self.waiting.swap(current, child);
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

    fn waiting(arrival_time: f64, priority: i32) -> Event {
        Event::arrival(&ArrivalRecord::new(arrival_time, 1.0, priority))
    }

    #[test]
    fn test_highest_priority_served_first() {
        let mut queue = ArrivalQueue::new(16);
        queue.add(waiting(1.0, 2)).unwrap();
        queue.add(waiting(2.0, 5)).unwrap();
        queue.add(waiting(3.0, 1)).unwrap();
        queue.add(waiting(4.0, 4)).unwrap();

        let priorities: Vec<i32> = (0..4).map(|_| queue.remove_max().unwrap().priority).collect();
        assert_eq!(priorities, vec![5, 4, 2, 1]);
    }

    #[test]
    fn test_equal_priority_breaks_tie_on_arrival_time() {
        let mut queue = ArrivalQueue::new(16);
        queue.add(waiting(5.0, 3)).unwrap();
        queue.add(waiting(1.0, 3)).unwrap();
        queue.add(waiting(3.0, 3)).unwrap();

        let arrivals: Vec<f64> = (0..3)
            .map(|_| queue.remove_max().unwrap().arrival_time)
            .collect();
        assert_eq!(arrivals, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_high_water_mark_tracks_peak_occupancy() {
        let mut queue = ArrivalQueue::new(16);
        assert_eq!(queue.high_water_mark(), 0);

        queue.add(waiting(1.0, 1)).unwrap();
        queue.add(waiting(2.0, 1)).unwrap();
        assert_eq!(queue.high_water_mark(), 2);

        queue.remove_max().unwrap();
        queue.remove_max().unwrap();
        assert_eq!(queue.high_water_mark(), 2);

        queue.add(waiting(3.0, 1)).unwrap();
        assert_eq!(queue.high_water_mark(), 2);
    }

    #[test]
    fn test_capacity_exceeded_is_an_error() {
        let mut queue = ArrivalQueue::new(1);
        queue.add(waiting(1.0, 1)).unwrap();
        assert_eq!(
            queue.add(waiting(2.0, 1)),
            Err(QueueError::CapacityExceeded { capacity: 1 })
        );
    }

    #[test]
    fn test_remove_from_empty_is_an_error() {
        let mut queue = ArrivalQueue::new(4);
        assert_eq!(queue.remove_max().unwrap_err(), QueueError::Empty);
    }
}
