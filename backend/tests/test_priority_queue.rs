//! Tests for the FIFO-stable priority queue

use bikeshare_simulator_core_rs::PriorityQueue;
use proptest::prelude::*;

#[test]
fn test_empty_queue() {
    let pq: PriorityQueue<&str, u32> = PriorityQueue::new();
    assert!(pq.is_empty());
    assert_eq!(pq.len(), 0);
    assert_eq!(pq.peek_priority(), None);
}

#[test]
fn test_insert_makes_non_empty() {
    let mut pq = PriorityQueue::new();
    pq.insert("fred", 1);
    assert!(!pq.is_empty());
}

#[test]
fn test_smallest_priority_first() {
    let mut pq = PriorityQueue::new();
    pq.insert("late", 30);
    pq.insert("early", 10);
    pq.insert("middle", 20);

    assert_eq!(pq.pop_min(), "early");
    assert_eq!(pq.pop_min(), "middle");
    assert_eq!(pq.pop_min(), "late");
    assert!(pq.is_empty());
}

#[test]
fn test_ties_keep_insertion_order_across_interleaving() {
    let mut pq = PriorityQueue::new();
    pq.insert(1, 0);
    pq.insert(2, 0);
    assert_eq!(pq.pop_min(), 1);

    // Later inserts at the same priority queue up behind earlier ones
    pq.insert(3, 0);
    pq.insert(4, 0);
    assert_eq!(pq.pop_min(), 2);
    assert_eq!(pq.pop_min(), 3);
    assert_eq!(pq.pop_min(), 4);
}

#[test]
fn test_clear_empties_queue() {
    let mut pq = PriorityQueue::new();
    pq.insert('a', 1);
    pq.insert('b', 2);
    pq.clear();
    assert!(pq.is_empty());
    assert_eq!(pq.try_pop_min(), None);
}

#[test]
#[should_panic(expected = "empty PriorityQueue")]
fn test_pop_min_on_empty_is_a_precondition_violation() {
    let mut pq: PriorityQueue<(), u8> = PriorityQueue::new();
    pq.pop_min();
}

proptest! {
    /// Output is sorted by priority, and equal priorities come out in the
    /// order they went in.
    #[test]
    fn prop_pop_order_is_sorted_and_stable(priorities in prop::collection::vec(0u8..8, 0..200)) {
        let mut pq = PriorityQueue::new();
        for (index, priority) in priorities.iter().enumerate() {
            pq.insert(index, *priority);
        }

        let mut popped = Vec::with_capacity(priorities.len());
        while !pq.is_empty() {
            let index = pq.pop_min();
            popped.push((priorities[index], index));
        }

        prop_assert_eq!(popped.len(), priorities.len());
        for pair in popped.windows(2) {
            let (p0, i0) = pair[0];
            let (p1, i1) = pair[1];
            prop_assert!(p0 <= p1);
            if p0 == p1 {
                prop_assert!(i0 < i1);
            }
        }
    }

    /// peek_priority always reports the priority of the item popped next.
    #[test]
    fn prop_peek_matches_pop(priorities in prop::collection::vec(any::<i32>(), 1..100)) {
        let mut pq = PriorityQueue::new();
        for priority in &priorities {
            pq.insert(*priority, *priority);
        }

        while let Some(&next) = pq.peek_priority() {
            prop_assert_eq!(pq.pop_min(), next);
        }
    }
}
