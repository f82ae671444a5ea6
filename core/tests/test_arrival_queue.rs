//! Integration tests for the priority waiting room.

use proptest::prelude::*;
use teller_sim_core::{ArrivalQueue, ArrivalRecord, Event, QueueError};

fn waiting(arrival_time: f64, priority: i32) -> Event {
    Event::arrival(&ArrivalRecord::new(arrival_time, 1.0, priority))
}

#[test]
fn test_priority_beats_arrival_order() {
    let mut queue = ArrivalQueue::new(8);
    queue.add(waiting(1.0, 1)).unwrap();
    queue.add(waiting(2.0, 9)).unwrap();

    // The later, higher-priority customer is served first.
    assert_eq!(queue.remove_max().unwrap().priority, 9);
    assert_eq!(queue.remove_max().unwrap().priority, 1);
}

#[test]
fn test_fifo_among_equal_priorities() {
    let mut queue = ArrivalQueue::new(8);
    for arrival in [4.0, 2.0, 3.0, 1.0] {
        queue.add(waiting(arrival, 5)).unwrap();
    }

    let order: Vec<f64> = (0..4)
        .map(|_| queue.remove_max().unwrap().arrival_time)
        .collect();
    assert_eq!(order, vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_overflow_reports_capacity() {
    let mut queue = ArrivalQueue::new(2);
    queue.add(waiting(1.0, 1)).unwrap();
    queue.add(waiting(2.0, 2)).unwrap();

    // The error names the same fixed bound the accessor reports.
    assert_eq!(queue.capacity(), 2);
    assert_eq!(
        queue.add(waiting(3.0, 3)),
        Err(QueueError::CapacityExceeded {
            capacity: queue.capacity()
        })
    );

    // The rejected customer must not have displaced anyone.
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.remove_max().unwrap().priority, 2);
}

#[test]
fn test_high_water_mark_survives_draining() {
    let mut queue = ArrivalQueue::new(8);
    for i in 0..5 {
        queue.add(waiting(i as f64, 1)).unwrap();
    }
    for _ in 0..5 {
        queue.remove_max().unwrap();
    }

    assert!(queue.is_empty());
    assert_eq!(queue.high_water_mark(), 5);
}

proptest! {
    /// Each removal returns the remaining customer with the highest
    /// priority, earliest arrival among equals.
    #[test]
    fn prop_removal_order_matches_comparator(
        customers in prop::collection::vec(((-5i32..5), (0u32..100)), 1..64)
    ) {
        let mut queue = ArrivalQueue::new(customers.len());
        for &(priority, arrival) in &customers {
            queue.add(waiting(arrival as f64, priority)).unwrap();
        }

        let mut expected: Vec<(i32, f64)> = customers
            .iter()
            .map(|&(p, a)| (p, a as f64))
            .collect();
        expected.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then(a.1.partial_cmp(&b.1).unwrap())
        });

        for (priority, arrival) in expected {
            let event = queue.remove_max().unwrap();
            prop_assert_eq!(event.priority, priority);
            prop_assert_eq!(event.arrival_time, arrival);
        }
    }

    /// The high-water mark is non-decreasing and equals the true maximum
    /// occupancy over any add/remove sequence.
    #[test]
    fn prop_high_water_mark_tracks_true_maximum(
        ops in prop::collection::vec(prop::bool::ANY, 1..128)
    ) {
        let mut queue = ArrivalQueue::new(128);
        let mut size = 0usize;
        let mut true_max = 0usize;
        let mut previous_mark = 0usize;

        for (i, add) in ops.into_iter().enumerate() {
            if add || size == 0 {
                queue.add(waiting(i as f64, (i % 7) as i32)).unwrap();
                size += 1;
                true_max = true_max.max(size);
            } else {
                queue.remove_max().unwrap();
                size -= 1;
            }

            prop_assert!(queue.high_water_mark() >= previous_mark);
            previous_mark = queue.high_water_mark();
            prop_assert_eq!(queue.high_water_mark(), true_max);
        }
    }
}
