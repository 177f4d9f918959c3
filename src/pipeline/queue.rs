use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// Thread-safe bounded queue for passing items between pipeline stages.
///
/// Freshest data wins: when the queue is full, `put` evicts the oldest item
/// instead of blocking the producer. Staleness is worse than loss for a
/// real-time HUD.
pub struct StageQueue<T> {
    inner: Mutex<VecDeque<T>>,
    not_empty: Condvar,
    capacity: usize,
}

impl<T> StageQueue<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            not_empty: Condvar::new(),
            capacity,
        }
    }

    /// Adds an item without ever blocking; drops the oldest item when full.
    pub fn put(&self, item: T) {
        let mut queue = self.inner.lock().unwrap();
        if queue.len() == self.capacity {
            queue.pop_front();
        }
        queue.push_back(item);
        drop(queue);
        self.not_empty.notify_one();
    }

    /// Waits up to `timeout` for the next item. `None` means no work arrived
    /// in time; callers treat that as an empty poll, not a failure.
    pub fn get(&self, timeout: Duration) -> Option<T> {
        let queue = self.inner.lock().unwrap();
        let (mut queue, _) = self
            .not_empty
            .wait_timeout_while(queue, timeout, |q| q.is_empty())
            .unwrap();
        queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
