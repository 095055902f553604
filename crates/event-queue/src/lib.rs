//! Bounded event queue
//!
//! Single-producer/single-consumer hand-off between the frame loop and the
//! persistence worker. The producer never blocks: when the queue is full the
//! oldest entry is evicted (bounded staleness, not backpressure). The
//! consumer drains the whole queue in one lock acquisition so the mutex is
//! never held across I/O.

mod queue;

pub use queue::{EventQueue, DEFAULT_CAPACITY};
