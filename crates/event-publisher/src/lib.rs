//! Best-effort event publisher
//!
//! One-to-many fan-out of serialized events to external subscribers.
//! Delivery is at-most-once: a send that would block fails fast, a
//! subscriber that connects late misses prior messages, and no failure ever
//! propagates to the caller. The transport sits behind [`PublishTransport`]
//! so its buffering semantics are swappable without touching the worker.

mod tcp;

pub use tcp::TcpFanout;

use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::{debug, info};

/// Publisher error types
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Failed to bind publish endpoint: {0}")]
    Bind(String),
}

/// Outbound transport seam.
///
/// `send` must never block the caller beyond its internal buffer hand-off;
/// a full buffer or missing subscriber returns `false`.
pub trait PublishTransport: Send + Sync {
    /// Hand one serialized message to the transport
    fn send(&self, payload: &str) -> bool;

    /// Release the underlying resources; must be idempotent
    fn close(&self);
}

/// Sent/failed counter snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublisherStats {
    pub messages_sent: u64,
    pub messages_failed: u64,
}

/// Best-effort publisher with monotonic delivery counters.
///
/// All methods are safe to call from a single writer context while the
/// counters are read concurrently for statistics reporting.
pub struct Publisher {
    transport: Box<dyn PublishTransport>,
    sent: AtomicU64,
    failed: AtomicU64,
}

impl Publisher {
    /// Bind a TCP fan-out publisher with the default high-water mark
    pub async fn bind(endpoint: &str) -> Result<Self, PublishError> {
        let transport = TcpFanout::bind(endpoint, tcp::DEFAULT_HIGH_WATER_MARK).await?;
        Ok(Self::with_transport(Box::new(transport)))
    }

    /// Wrap an already-constructed transport
    pub fn with_transport(transport: Box<dyn PublishTransport>) -> Self {
        Self {
            transport,
            sent: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    /// Publish one message; failure is an expected steady-state outcome
    /// (no subscriber connected, subscriber buffer full) and only counted.
    pub fn publish(&self, message: &str) -> bool {
        if self.transport.send(message) {
            self.sent.fetch_add(1, Ordering::Relaxed);
            true
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed);
            debug!("publish failed, no subscriber accepted the message");
            false
        }
    }

    /// Snapshot the delivery counters
    pub fn stats(&self) -> PublisherStats {
        PublisherStats {
            messages_sent: self.sent.load(Ordering::Relaxed),
            messages_failed: self.failed.load(Ordering::Relaxed),
        }
    }

    /// Release the transport; idempotent
    pub fn shutdown(&self) {
        self.transport.close();
        let stats = self.stats();
        info!(
            sent = stats.messages_sent,
            failed = stats.messages_failed,
            "publisher shut down"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    struct FixedTransport {
        accept: AtomicBool,
        closed: AtomicU64,
    }

    impl FixedTransport {
        fn new(accept: bool) -> Self {
            Self {
                accept: AtomicBool::new(accept),
                closed: AtomicU64::new(0),
            }
        }
    }

    impl PublishTransport for FixedTransport {
        fn send(&self, _payload: &str) -> bool {
            self.accept.load(Ordering::Relaxed)
        }

        fn close(&self) {
            self.closed.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_failed_send_counts_as_failure() {
        let publisher = Publisher::with_transport(Box::new(FixedTransport::new(false)));

        assert!(!publisher.publish("{}"));
        assert!(!publisher.publish("{}"));

        let stats = publisher.stats();
        assert_eq!(stats.messages_sent, 0);
        assert_eq!(stats.messages_failed, 2);
    }

    #[test]
    fn test_successful_send_counts_as_sent() {
        let publisher = Publisher::with_transport(Box::new(FixedTransport::new(true)));

        assert!(publisher.publish("{}"));

        let stats = publisher.stats();
        assert_eq!(stats.messages_sent, 1);
        assert_eq!(stats.messages_failed, 0);
    }

    #[test]
    fn test_shutdown_reaches_transport() {
        let transport = Box::new(FixedTransport::new(true));
        let publisher = Publisher::with_transport(transport);
        publisher.shutdown();
        publisher.shutdown();
    }
}
