//! Event logger lifecycle and persistence worker

use crate::config::LogConfig;
use crate::event::LogEvent;
use crate::snapshot::{FrameImage, SnapshotPolicy};
use driver_state::DriverState;
use event_publisher::{Publisher, PublisherStats};
use event_queue::EventQueue;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// Logging subsystem error types
#[derive(Error, Debug)]
pub enum LogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Event logger already initialized")]
    AlreadyInitialized,
}

/// Handle to the asynchronous logging subsystem.
///
/// `log` enqueues without blocking; a background worker drains the queue,
/// appends durable records, and fans them out to subscribers. `shutdown`
/// joins the worker, after which every event logged before the call is on
/// disk.
pub struct EventLogger {
    queue: Arc<EventQueue<LogEvent>>,
    snapshots: SnapshotPolicy,
    publisher: Option<Arc<Publisher>>,
    shutdown_tx: watch::Sender<bool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl EventLogger {
    /// Set up directories, open the durable log, bind the publisher when
    /// enabled, and spawn the persistence worker.
    ///
    /// A publisher bind failure degrades to publishing-off; it does not
    /// fail startup.
    pub async fn start(config: LogConfig) -> Result<Self, LogError> {
        if config.save_snapshots {
            fs::create_dir_all(&config.snapshot_path)?;
        }

        let file = if config.enable_file_logging {
            fs::create_dir_all(&config.log_path)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(config.log_file())?;
            Some(BufWriter::new(file))
        } else {
            None
        };

        let publisher = if config.enable_publishing {
            match Publisher::bind(&config.publish_endpoint).await {
                Ok(publisher) => Some(Arc::new(publisher)),
                Err(e) => {
                    error!("publishing disabled: {e}");
                    None
                }
            }
        } else {
            None
        };

        let queue = Arc::new(EventQueue::new(config.queue_capacity));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let worker = PersistenceWorker {
            queue: Arc::clone(&queue),
            file,
            json_records: config.enable_file_logging_json,
            console: config.enable_console_logging,
            publisher: publisher.clone(),
            interval: Duration::from_millis(config.flush_interval_ms.max(1)),
        };
        let handle = tokio::spawn(worker.run(shutdown_rx));

        info!(
            log_file = %config.log_file().display(),
            publishing = publisher.is_some(),
            "event logger started"
        );

        Ok(Self {
            queue,
            snapshots: SnapshotPolicy::new(config.save_snapshots, config.snapshot_path),
            publisher,
            shutdown_tx,
            worker: Mutex::new(Some(handle)),
        })
    }

    /// Enqueue one event; never blocks the frame loop
    pub fn log(&self, event: LogEvent) {
        self.queue.push(event);
    }

    /// Apply the snapshot policy to the current frame
    pub fn snapshot(&self, frame: &FrameImage, state: DriverState) -> Option<String> {
        self.snapshots.store(frame, state)
    }

    /// Publisher delivery counters, when publishing is active
    pub fn publisher_stats(&self) -> Option<PublisherStats> {
        self.publisher.as_ref().map(|p| p.stats())
    }

    /// Events evicted from the queue due to overflow
    pub fn dropped_events(&self) -> u64 {
        self.queue.dropped_total()
    }

    /// Stop the worker after a final drain-and-flush. Idempotent; when this
    /// returns, no further writes will occur.
    pub async fn shutdown(&self) {
        let handle = self
            .worker
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        let Some(handle) = handle else {
            return;
        };

        let _ = self.shutdown_tx.send(true);
        if let Err(e) = handle.await {
            error!("persistence worker join failed: {e}");
        }
        if let Some(publisher) = &self.publisher {
            publisher.shutdown();
        }
        info!("event logger shut down");
    }
}

/// Background loop draining the queue into the durable log and publisher
struct PersistenceWorker {
    queue: Arc<EventQueue<LogEvent>>,
    file: Option<BufWriter<File>>,
    json_records: bool,
    console: bool,
    publisher: Option<Arc<Publisher>>,
    interval: Duration,
}

impl PersistenceWorker {
    async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) {
        // Wait a full interval before the first drain
        let mut tick =
            tokio::time::interval_at(tokio::time::Instant::now() + self.interval, self.interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    self.process_batch();
                }
                _ = shutdown_rx.changed() => {
                    // Final pass: everything enqueued before the shutdown
                    // signal must reach the file.
                    self.process_batch();
                    break;
                }
            }
        }
        debug!("persistence worker stopped");
    }

    fn process_batch(&mut self) {
        let events = self.queue.drain_all();
        if events.is_empty() {
            return;
        }

        for event in &events {
            let json = match event.to_json_line() {
                Ok(json) => json,
                Err(e) => {
                    error!("event serialization failed, record skipped: {e}");
                    continue;
                }
            };

            if self.console {
                info!(target: "driver_events", "{}", event.to_text_line());
            }

            if let Some(file) = &mut self.file {
                let record = if self.json_records {
                    json.clone()
                } else {
                    event.to_text_line()
                };
                // Best-effort durability: the next batch retries against the
                // same open handle.
                if let Err(e) = writeln!(file, "{record}") {
                    error!("log write failed: {e}");
                }
            }

            if let Some(publisher) = &self.publisher {
                publisher.publish(&json);
            }
        }

        if let Some(file) = &mut self.file {
            if let Err(e) = file.flush() {
                error!("log flush failed: {e}");
            }
        }
    }
}
