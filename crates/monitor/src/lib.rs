//! Driver vigilance monitor
//!
//! Wires the state tracker to the logging pipeline. The vision pipeline is
//! an external oracle: per frame it yields EAR/MAR scalars and optional
//! head-pose angles, consumed here as [`MetricSample`]s.

pub mod pipeline;
pub mod sample;
pub mod settings;

pub use pipeline::{FrameOutcome, Pipeline};
pub use sample::MetricSample;
pub use settings::MonitorConfig;
