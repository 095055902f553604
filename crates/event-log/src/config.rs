//! Logging subsystem configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Logging, snapshot, and publishing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Echo each event to the console channel
    pub enable_console_logging: bool,

    /// Append each event to the durable log file
    pub enable_file_logging: bool,

    /// Write JSONL records; plain-text lines otherwise
    pub enable_file_logging_json: bool,

    /// Persist frame snapshots for notable states
    pub save_snapshots: bool,

    /// Publish serialized events to subscribers
    pub enable_publishing: bool,

    /// Bounded event queue capacity
    pub queue_capacity: usize,

    /// Worker drain interval in milliseconds
    pub flush_interval_ms: u64,

    /// Directory for snapshot artifacts
    pub snapshot_path: PathBuf,

    /// Directory for the durable log
    pub log_path: PathBuf,

    /// Durable log file name
    pub log_filename: String,

    /// Publish socket endpoint
    pub publish_endpoint: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enable_console_logging: false,
            enable_file_logging: true,
            enable_file_logging_json: true,
            save_snapshots: true,
            enable_publishing: false,
            queue_capacity: event_queue::DEFAULT_CAPACITY,
            flush_interval_ms: 200,
            snapshot_path: PathBuf::from("snapshots"),
            log_path: PathBuf::from("logs"),
            log_filename: "drowsiness_log.jsonl".to_string(),
            publish_endpoint: "127.0.0.1:5555".to_string(),
        }
    }
}

impl LogConfig {
    /// Full path of the durable log file
    pub fn log_file(&self) -> PathBuf {
        self.log_path.join(&self.log_filename)
    }
}
