//! Asynchronous event logging pipeline
//!
//! The frame loop enqueues [`LogEvent`]s without blocking; a background
//! persistence worker drains the bounded queue, appends durable JSONL (or
//! plain-text) records, stores snapshot artifacts, and fans serialized
//! events out to subscribers best-effort. Every failure is handled at the
//! component where it occurs; nothing propagates back to the producer.

pub mod config;
pub mod event;
pub mod snapshot;
pub mod worker;

pub use config::LogConfig;
pub use event::LogEvent;
pub use snapshot::{FrameImage, SnapshotPolicy};
pub use worker::{EventLogger, LogError};

use std::sync::OnceLock;

static GLOBAL: OnceLock<EventLogger> = OnceLock::new();

/// Install a process-wide logger handle.
///
/// Exactly one install per process run; a second attempt is rejected rather
/// than silently overwriting the running subsystem. Prefer passing the
/// [`EventLogger`] handle explicitly; this exists for call sites that cannot
/// thread it through.
pub fn install(logger: EventLogger) -> Result<(), LogError> {
    GLOBAL.set(logger).map_err(|_| LogError::AlreadyInitialized)
}

/// The installed process-wide logger, if any
pub fn global() -> Option<&'static EventLogger> {
    GLOBAL.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_second_install_is_rejected() {
        let dir = TempDir::new().unwrap();
        let base = LogConfig {
            enable_file_logging: false,
            save_snapshots: false,
            ..Default::default()
        };
        let first = EventLogger::start(LogConfig {
            log_path: dir.path().join("a"),
            ..base.clone()
        })
        .await
        .unwrap();
        let second = EventLogger::start(LogConfig {
            log_path: dir.path().join("b"),
            ..base
        })
        .await
        .unwrap();

        assert!(global().is_none());
        install(first).unwrap();
        assert!(global().is_some());

        match install(second) {
            Err(LogError::AlreadyInitialized) => {}
            other => panic!("expected AlreadyInitialized, got {other:?}"),
        }

        global().unwrap().shutdown().await;
    }
}
