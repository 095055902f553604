//! Driver state enumeration

use serde::{Deserialize, Serialize};

/// Debounced driver state.
///
/// `Alert` is the unique quiet state; every other variant is "notable" and
/// eligible for event logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverState {
    #[default]
    Alert,
    Drowsy,
    Yawning,
    DrowsyYawning,
    Distracted,
    DrowsyDistracted,
    #[serde(rename = "NO_FACE")]
    NoFaceDetected,
}

impl DriverState {
    /// Whether this state should produce a log event
    pub fn is_notable(&self) -> bool {
        *self != DriverState::Alert
    }

    /// Name used in durable log records
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverState::Alert => "ALERT",
            DriverState::Drowsy => "DROWSY",
            DriverState::Yawning => "YAWNING",
            DriverState::DrowsyYawning => "DROWSY_YAWNING",
            DriverState::Distracted => "DISTRACTED",
            DriverState::DrowsyDistracted => "DROWSY_DISTRACTED",
            DriverState::NoFaceDetected => "NO_FACE",
        }
    }

    /// Human-readable message for state-change events
    pub fn describe(&self) -> &'static str {
        match self {
            DriverState::Drowsy => "Driver showing signs of drowsiness",
            DriverState::Yawning => "Driver is yawning",
            DriverState::DrowsyYawning => "Driver is drowsy and yawning - HIGH RISK",
            DriverState::Distracted => "Driver is looking away from the road",
            DriverState::DrowsyDistracted => "Driver is drowsy and distracted - CRITICAL RISK",
            DriverState::NoFaceDetected => "No face detected",
            DriverState::Alert => "State change detected",
        }
    }
}

impl std::fmt::Display for DriverState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notable_states() {
        assert!(!DriverState::Alert.is_notable());
        assert!(DriverState::Drowsy.is_notable());
        assert!(DriverState::Yawning.is_notable());
        assert!(DriverState::NoFaceDetected.is_notable());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&DriverState::DrowsyYawning).unwrap();
        assert_eq!(json, "\"DROWSY_YAWNING\"");

        let json = serde_json::to_string(&DriverState::NoFaceDetected).unwrap();
        assert_eq!(json, "\"NO_FACE\"");

        let state: DriverState = serde_json::from_str("\"DISTRACTED\"").unwrap();
        assert_eq!(state, DriverState::Distracted);
    }

    #[test]
    fn test_display_matches_serde() {
        for state in [
            DriverState::Alert,
            DriverState::DrowsyDistracted,
            DriverState::NoFaceDetected,
        ] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state));
        }
    }
}
