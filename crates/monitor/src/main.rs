//! Driver Vigilance Monitor - Main Entry Point
//!
//! Reads metric samples (one CSV line per frame) from stdin, runs them
//! through the debounced state tracker, and hands notable states to the
//! asynchronous logging pipeline.

use anyhow::Result;
use event_log::EventLogger;
use monitor::{settings, MetricSample, Pipeline};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Initialize logging
fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    info!("=== Driver Vigilance Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1);
    let config = settings::load(config_path.as_deref())?;
    info!(
        ear_threshold = config.tracker.ear_threshold,
        mar_threshold = config.tracker.mar_threshold,
        head_pose = config.tracker.enable_head_pose_detection,
        "configuration loaded"
    );

    let logger = EventLogger::start(config.log).await?;
    let mut pipeline = Pipeline::new(config.tracker);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut frames = 0u64;
    while let Some(line) = lines.next_line().await? {
        let sample = match line.parse::<MetricSample>() {
            Ok(sample) => sample,
            Err(e) => {
                warn!("skipping malformed sample: {e}");
                continue;
            }
        };

        let outcome = pipeline.process(&sample);
        if let Some(event) = outcome.event {
            logger.log(event);
        }
        frames += 1;
    }

    info!(frames, "input exhausted, shutting down");
    logger.shutdown().await;

    if let Some(stats) = logger.publisher_stats() {
        info!(
            sent = stats.messages_sent,
            failed = stats.messages_failed,
            "publisher stats"
        );
    }
    if logger.dropped_events() > 0 {
        warn!(dropped = logger.dropped_events(), "events evicted under load");
    }

    Ok(())
}
