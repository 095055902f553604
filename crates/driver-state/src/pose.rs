//! Head pose types and direction classification
//!
//! Pose angles are produced by the external vision pipeline (PnP solve over
//! facial landmarks); this module only classifies them into a coarse
//! direction for the distraction debounce.

use crate::config::PoseThresholds;
use serde::{Deserialize, Serialize};

/// Coarse head direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeadDirection {
    Forward,
    Left,
    Right,
    Up,
    Down,
    #[default]
    Unknown,
}

impl HeadDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadDirection::Forward => "Forward",
            HeadDirection::Left => "Looking Left",
            HeadDirection::Right => "Looking Right",
            HeadDirection::Up => "Looking Up",
            HeadDirection::Down => "Looking Down",
            HeadDirection::Unknown => "Unknown",
        }
    }
}

/// Head pose (Euler angles, degrees) with a validity flag.
///
/// An invalid pose means the upstream solve failed for this frame; it must be
/// treated as "not looking away", never as a continuation of a look-away.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HeadPose {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
    pub direction: HeadDirection,
    pub valid: bool,
}

impl HeadPose {
    /// Build a valid pose, classifying its direction from the thresholds
    pub fn new(pitch: f64, yaw: f64, roll: f64, thresholds: &PoseThresholds) -> Self {
        Self {
            pitch,
            yaw,
            roll,
            direction: classify_direction(pitch, yaw, thresholds),
            valid: true,
        }
    }
}

/// Classify pitch/yaw angles into a head direction.
///
/// Yaw is checked before pitch, so a driver looking left and down reads as
/// `Left`.
pub fn classify_direction(pitch: f64, yaw: f64, thresholds: &PoseThresholds) -> HeadDirection {
    if yaw < thresholds.yaw_left {
        return HeadDirection::Left;
    }
    if yaw > thresholds.yaw_right {
        return HeadDirection::Right;
    }

    if pitch < thresholds.pitch_down {
        return HeadDirection::Down;
    }
    if pitch > thresholds.pitch_up {
        return HeadDirection::Up;
    }

    HeadDirection::Forward
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> PoseThresholds {
        PoseThresholds {
            yaw_left: -35.0,
            yaw_right: 30.0,
            pitch_up: 20.0,
            pitch_down: -20.0,
        }
    }

    #[test]
    fn test_forward() {
        let t = thresholds();
        assert_eq!(classify_direction(0.0, 0.0, &t), HeadDirection::Forward);
        assert_eq!(classify_direction(10.0, -20.0, &t), HeadDirection::Forward);
    }

    #[test]
    fn test_left_right() {
        let t = thresholds();
        assert_eq!(classify_direction(0.0, -40.0, &t), HeadDirection::Left);
        assert_eq!(classify_direction(0.0, 45.0, &t), HeadDirection::Right);
    }

    #[test]
    fn test_yaw_wins_over_pitch() {
        let t = thresholds();
        // Looking left and down classifies as left
        assert_eq!(classify_direction(-50.0, -50.0, &t), HeadDirection::Left);
    }

    #[test]
    fn test_up_down() {
        let t = thresholds();
        assert_eq!(classify_direction(30.0, 0.0, &t), HeadDirection::Up);
        assert_eq!(classify_direction(-30.0, 0.0, &t), HeadDirection::Down);
    }

    #[test]
    fn test_boundary_is_forward() {
        let t = thresholds();
        // Threshold-equal angles do not trigger
        assert_eq!(classify_direction(20.0, 30.0, &t), HeadDirection::Forward);
    }
}
