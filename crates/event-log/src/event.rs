//! Log event value and record formats

use chrono::{DateTime, Utc};
use driver_state::DriverState;
use serde::{Deserialize, Serialize};

/// One notable occurrence, captured at the moment it was observed.
///
/// Immutable after construction; the worker serializes it unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    #[serde(with = "timestamp_format")]
    pub timestamp: DateTime<Utc>,
    pub state: DriverState,
    pub ear: f64,
    pub mar: f64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub yaw: Option<f64>,
    #[serde(
        rename = "image",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub snapshot_path: Option<String>,
}

impl LogEvent {
    /// Create an event timestamped now
    pub fn new(state: DriverState, message: impl Into<String>, ear: f64, mar: f64) -> Self {
        Self {
            timestamp: Utc::now(),
            state,
            ear,
            mar,
            message: message.into(),
            yaw: None,
            snapshot_path: None,
        }
    }

    /// Attach the observed head yaw
    pub fn with_yaw(mut self, yaw: f64) -> Self {
        self.yaw = Some(yaw);
        self
    }

    /// Attach a stored snapshot path
    pub fn with_snapshot(mut self, path: impl Into<String>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Serialize to the one-object-per-line durable record format
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to the plain-text fallback record format
    pub fn to_text_line(&self) -> String {
        let mut line = format!(
            "{} | State: {} | EAR: {:.3} | MAR: {:.3} | Message: {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.state,
            self.ear,
            self.mar,
            self.message
        );
        if let Some(path) = &self.snapshot_path {
            line.push_str(" | Image: ");
            line.push_str(path);
        }
        line
    }
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
