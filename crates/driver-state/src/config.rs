//! Tracker configuration

use serde::{Deserialize, Serialize};

/// Head-direction classification thresholds (degrees)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseThresholds {
    /// Yaw below this is looking left
    pub yaw_left: f64,
    /// Yaw above this is looking right
    pub yaw_right: f64,
    /// Pitch above this is looking up
    pub pitch_up: f64,
    /// Pitch below this is looking down
    pub pitch_down: f64,
}

impl Default for PoseThresholds {
    fn default() -> Self {
        Self {
            yaw_left: -35.0,
            yaw_right: 30.0,
            pitch_up: 20.0,
            pitch_down: -20.0,
        }
    }
}

/// State tracker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// EAR below this counts as eyes closed
    pub ear_threshold: f64,

    /// MAR above this counts as yawning
    pub mar_threshold: f64,

    /// Continuous eye closure required before drowsy (seconds)
    pub drowsy_time_seconds: f64,

    /// Continuous look-away required before distracted (seconds)
    pub distraction_time_seconds: f64,

    /// Enable head-pose distraction detection
    pub enable_head_pose_detection: bool,

    /// Head-direction classification thresholds
    pub pose: PoseThresholds,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            ear_threshold: 0.25,
            mar_threshold: 0.7,
            drowsy_time_seconds: 2.0,
            distraction_time_seconds: 2.0,
            enable_head_pose_detection: false,
            pose: PoseThresholds::default(),
        }
    }
}

impl TrackerConfig {
    /// Create strict config (shorter debounce windows)
    pub fn strict() -> Self {
        Self {
            drowsy_time_seconds: 1.0,
            distraction_time_seconds: 1.5,
            ..Default::default()
        }
    }

    /// Create lenient config (longer debounce windows)
    pub fn lenient() -> Self {
        Self {
            drowsy_time_seconds: 3.0,
            distraction_time_seconds: 4.0,
            ..Default::default()
        }
    }
}
