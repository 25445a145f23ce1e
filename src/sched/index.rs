//! Ordered Index: a total-order container of task references, parameterized
//! by key, supporting O(log n) insert/remove and O(1) minimum lookup.
//!
//! Backed by [`priority_queue::PriorityQueue`], a binary-heap-backed map from
//! item to priority that already gives O(1) `peek` of the top element and
//! O(log n) arbitrary-item removal — exactly the contract this module's
//! callers (the ready tree and the pending-arrivals tree) need. Since
//! `PriorityQueue` is a max-heap, keys are stored `Reverse`d so that the
//! *smallest* key surfaces as the heap's maximum.

use priority_queue::PriorityQueue;
use std::cmp::Reverse;

use crate::task::Pid;

/// An ordered index of `Pid`s keyed by `K`, where `K` supplies the total
/// order (ties are expected to already be broken by embedding `Pid` in `K`).
pub struct OrderedIndex<K: Ord + Copy> {
    queue: PriorityQueue<Pid, Reverse<K>>,
}

impl<K: Ord + Copy> OrderedIndex<K> {
    pub fn new() -> Self {
        Self {
            queue: PriorityQueue::new(),
        }
    }

    /// Insert `pid` under `key`. The caller guarantees `pid` uniqueness
    /// within this index; inserting an already-present pid simply updates
    /// its key.
    pub fn insert(&mut self, pid: Pid, key: K) {
        self.queue.push(pid, Reverse(key));
    }

    /// Remove `pid` if present, returning its key. A no-op (returns `None`)
    /// if `pid` is absent.
    pub fn remove(&mut self, pid: Pid) -> Option<K> {
        self.queue.remove(&pid).map(|(_, Reverse(key))| key)
    }

    /// The element with the smallest key, without removing it.
    pub fn min(&self) -> Option<(Pid, K)> {
        self.queue.peek().map(|(&pid, &Reverse(key))| (pid, key))
    }

    /// Remove and return the element with the smallest key.
    pub fn pop_min(&mut self) -> Option<(Pid, K)> {
        self.queue.pop().map(|(pid, Reverse(key))| (pid, key))
    }

    /// Current cardinality.
    pub fn count(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<K: Ord + Copy> Default for OrderedIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ready-tree key: orders by virtual runtime, ties broken by pid (I3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VRuntimeKey {
    pub v_runtime: u64,
    pub pid: Pid,
}

/// Pending-tree key: orders by arrival time, ties broken by pid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArrivalKey {
    pub arrival: u64,
    pub pid: Pid,
}
