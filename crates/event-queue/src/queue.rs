//! Drop-oldest queue implementation

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Default queue capacity
pub const DEFAULT_CAPACITY: usize = 1000;

/// Bounded FIFO queue with oldest-eviction overflow.
///
/// `push` and `drain_all` take the lock only to move items; no I/O ever
/// happens under it.
pub struct EventQueue<T> {
    items: Mutex<VecDeque<T>>,
    capacity: usize,
    /// Events evicted due to overflow (for observability)
    dropped: AtomicU64,
}

impl<T> EventQueue<T> {
    /// Create a queue with the given capacity (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            dropped: AtomicU64::new(0),
        }
    }

    /// Create a queue with default capacity (1000 events)
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Enqueue an event, evicting the oldest entry when full.
    ///
    /// Never blocks beyond the short internal lock and never fails.
    pub fn push(&self, item: T) {
        let mut items = match self.items.lock() {
            Ok(guard) => guard,
            // A poisoned lock still holds a consistent VecDeque
            Err(poisoned) => poisoned.into_inner(),
        };

        while items.len() >= self.capacity {
            items.pop_front();
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
        items.push_back(item);
    }

    /// Atomically remove and return everything queued, in enqueue order
    pub fn drain_all(&self) -> Vec<T> {
        let mut items = match self.items.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        items.drain(..).collect()
    }

    /// Number of events currently queued
    pub fn len(&self) -> usize {
        match self.items.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Queue capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total events evicted due to overflow
    pub fn dropped_total(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
