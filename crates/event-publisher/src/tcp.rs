//! Topic-less TCP fan-out transport
//!
//! Binds a listener at the configured endpoint; every connected subscriber
//! gets its own bounded outbound buffer and writer task. Messages are
//! newline-delimited JSON. A subscriber whose buffer is full simply misses
//! the message; a disconnected subscriber is pruned on the next send.

use crate::{PublishError, PublishTransport};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Default per-subscriber outbound buffer capacity
pub const DEFAULT_HIGH_WATER_MARK: usize = 1000;

type SubscriberList = Arc<Mutex<Vec<mpsc::Sender<String>>>>;

/// TCP fan-out publish transport
pub struct TcpFanout {
    subscribers: SubscriberList,
    accept_task: Mutex<Option<JoinHandle<()>>>,
    local_addr: SocketAddr,
}

impl TcpFanout {
    /// Bind the publish endpoint and start accepting subscribers.
    ///
    /// `high_water_mark` bounds each subscriber's outbound buffer; sends to
    /// a full buffer fail fast instead of blocking.
    pub async fn bind(endpoint: &str, high_water_mark: usize) -> Result<Self, PublishError> {
        let listener = TcpListener::bind(endpoint)
            .await
            .map_err(|e| PublishError::Bind(format!("{endpoint}: {e}")))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| PublishError::Bind(e.to_string()))?;

        let subscribers: SubscriberList = Arc::new(Mutex::new(Vec::new()));
        let accept_task = tokio::spawn(accept_loop(
            listener,
            Arc::clone(&subscribers),
            high_water_mark.max(1),
        ));

        info!(%local_addr, "publisher bound");
        Ok(Self {
            subscribers,
            accept_task: Mutex::new(Some(accept_task)),
            local_addr,
        })
    }

    /// The bound address (useful when binding port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Number of currently registered subscribers
    pub fn subscriber_count(&self) -> usize {
        lock_subscribers(&self.subscribers).len()
    }
}

impl PublishTransport for TcpFanout {
    fn send(&self, payload: &str) -> bool {
        let mut subscribers = lock_subscribers(&self.subscribers);
        if subscribers.is_empty() {
            return false;
        }

        let line = format!("{payload}\n");
        let mut delivered = false;
        subscribers.retain(|tx| match tx.try_send(line.clone()) {
            Ok(()) => {
                delivered = true;
                true
            }
            // Slow subscriber keeps its slot but misses this message
            Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Closed(_)) => false,
        });
        delivered
    }

    fn close(&self) {
        if let Some(task) = self
            .accept_task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
        {
            task.abort();
        }
        // Dropping the senders ends the per-subscriber writer tasks
        lock_subscribers(&self.subscribers).clear();
    }
}

impl Drop for TcpFanout {
    fn drop(&mut self) {
        self.close();
    }
}

fn lock_subscribers(
    subscribers: &SubscriberList,
) -> std::sync::MutexGuard<'_, Vec<mpsc::Sender<String>>> {
    subscribers
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

async fn accept_loop(listener: TcpListener, subscribers: SubscriberList, high_water_mark: usize) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                info!(%peer, "subscriber connected");
                let (tx, rx) = mpsc::channel(high_water_mark);
                lock_subscribers(&subscribers).push(tx);
                tokio::spawn(write_loop(stream, rx));
            }
            Err(e) => {
                warn!("accept failed: {e}");
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            }
        }
    }
}

async fn write_loop(mut stream: TcpStream, mut rx: mpsc::Receiver<String>) {
    while let Some(line) = rx.recv().await {
        if let Err(e) = stream.write_all(line.as_bytes()).await {
            warn!("subscriber write failed, dropping connection: {e}");
            break;
        }
    }
}
