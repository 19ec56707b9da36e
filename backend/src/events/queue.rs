//! FIFO-stable priority queue
//!
//! A min-priority queue in which items of equal priority leave in the order
//! they were inserted. A plain binary heap gives no such guarantee, so every
//! entry carries an insertion sequence number used as the secondary key.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry<P, T> {
    priority: P,
    seq: u64,
    item: T,
}

// BinaryHeap is a max-heap; reverse the comparison so the smallest
// (priority, seq) pair sits at the top.
impl<P: Ord, T> Ord for Entry<P, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
            .reverse()
    }
}

impl<P: Ord, T> PartialOrd for Entry<P, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: Ord, T> PartialEq for Entry<P, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<P: Ord, T> Eq for Entry<P, T> {}

/// Min-priority queue with first-in-first-out tie-breaking
///
/// # Example
/// ```
/// use bikeshare_simulator_core_rs::PriorityQueue;
///
/// let mut pq = PriorityQueue::new();
/// pq.insert("fred", 2);
/// pq.insert("arju", 1);
/// pq.insert("hat", 2);
///
/// assert_eq!(pq.pop_min(), "arju");
/// assert_eq!(pq.pop_min(), "fred");
/// assert_eq!(pq.pop_min(), "hat");
/// assert!(pq.is_empty());
/// ```
pub struct PriorityQueue<T, P: Ord> {
    heap: BinaryHeap<Entry<P, T>>,
    next_seq: u64,
}

impl<T, P: Ord> PriorityQueue<T, P> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Insert `item` with the given priority. O(log n).
    pub fn insert(&mut self, item: T, priority: P) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            item,
        });
    }

    /// Remove and return the item with the smallest priority
    ///
    /// Among equal priorities the earliest inserted item is returned.
    ///
    /// # Panics
    /// Panics if the queue is empty. Callers must check [`is_empty`] first.
    ///
    /// [`is_empty`]: PriorityQueue::is_empty
    pub fn pop_min(&mut self) -> T {
        match self.heap.pop() {
            Some(entry) => entry.item,
            None => panic!("pop_min called on an empty PriorityQueue"),
        }
    }

    /// Remove and return the next item, or `None` if the queue is empty
    pub fn try_pop_min(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }

    /// Priority of the item [`pop_min`] would return next
    ///
    /// [`pop_min`]: PriorityQueue::pop_min
    pub fn peek_priority(&self) -> Option<&P> {
        self.heap.peek().map(|entry| &entry.priority)
    }

    /// Item [`pop_min`] would return next
    ///
    /// [`pop_min`]: PriorityQueue::pop_min
    pub fn peek(&self) -> Option<&T> {
        self.heap.peek().map(|entry| &entry.item)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Remove every item
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T, P: Ord> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> std::fmt::Debug for PriorityQueue<T, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.heap.len())
            .field("next_seq", &self.next_seq)
            .finish()
    }
}
