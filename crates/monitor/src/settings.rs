//! Layered configuration loading

use driver_state::TrackerConfig;
use event_log::LogConfig;
use serde::{Deserialize, Serialize};

/// Full monitor configuration: tracker thresholds plus logging pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub tracker: TrackerConfig,
    pub log: LogConfig,
}

/// Load configuration from an optional file layered under `MONITOR_*`
/// environment variables (e.g. `MONITOR_TRACKER__EAR_THRESHOLD=0.22`).
pub fn load(path: Option<&str>) -> Result<MonitorConfig, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::with_name(path));
    }
    builder
        .add_source(config::Environment::with_prefix("MONITOR").separator("__"))
        .build()?
        .try_deserialize()
}
