//! Per-frame processing pipeline

use crate::sample::MetricSample;
use driver_state::{DriverState, HeadPose, PoseThresholds, StateTracker, TrackerConfig};
use event_log::LogEvent;

/// Result of processing one frame
#[derive(Debug)]
pub struct FrameOutcome {
    /// Debounced state for this frame
    pub state: DriverState,
    /// Event to enqueue when the state is notable
    pub event: Option<LogEvent>,
}

/// Frame pipeline: classifies pose angles, updates the tracker, and builds
/// log events for notable states.
pub struct Pipeline {
    tracker: StateTracker,
    pose_thresholds: PoseThresholds,
    head_pose_enabled: bool,
}

impl Pipeline {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            pose_thresholds: config.pose,
            head_pose_enabled: config.enable_head_pose_detection,
            tracker: StateTracker::new(config),
        }
    }

    /// Process one sample from the vision oracle
    pub fn process(&mut self, sample: &MetricSample) -> FrameOutcome {
        match *sample {
            MetricSample::NoFace => {
                let state = DriverState::NoFaceDetected;
                FrameOutcome {
                    state,
                    event: Some(LogEvent::new(state, state.describe(), 0.0, 0.0)),
                }
            }
            MetricSample::Metrics { ear, mar, angles } => {
                let pose = angles.map(|(pitch, yaw, roll)| {
                    HeadPose::new(pitch, yaw, roll, &self.pose_thresholds)
                });

                let state = self.tracker.update(ear, mar, pose.as_ref());
                let event = state.is_notable().then(|| {
                    let mut event = LogEvent::new(state, state.describe(), ear, mar);
                    if self.head_pose_enabled {
                        if let Some(pose) = pose.filter(|p| p.valid) {
                            event = event.with_yaw(pose.yaw);
                        }
                    }
                    event
                });

                FrameOutcome { state, event }
            }
        }
    }

    /// The tracker's most recent state
    pub fn last_state(&self) -> DriverState {
        self.tracker.last_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_frame_produces_no_event() {
        let mut pipeline = Pipeline::new(TrackerConfig::default());
        let outcome = pipeline.process(&MetricSample::Metrics {
            ear: 0.30,
            mar: 0.2,
            angles: None,
        });

        assert_eq!(outcome.state, DriverState::Alert);
        assert!(outcome.event.is_none());
    }

    #[test]
    fn test_yawning_frame_produces_event() {
        let mut pipeline = Pipeline::new(TrackerConfig::default());
        let outcome = pipeline.process(&MetricSample::Metrics {
            ear: 0.30,
            mar: 0.9,
            angles: None,
        });

        assert_eq!(outcome.state, DriverState::Yawning);
        let event = outcome.event.unwrap();
        assert_eq!(event.state, DriverState::Yawning);
        assert_eq!(event.message, "Driver is yawning");
        assert_eq!(event.ear, 0.30);
        assert_eq!(event.mar, 0.9);
        assert!(event.yaw.is_none());
    }

    #[test]
    fn test_no_face_produces_event() {
        let mut pipeline = Pipeline::new(TrackerConfig::default());
        let outcome = pipeline.process(&MetricSample::NoFace);

        assert_eq!(outcome.state, DriverState::NoFaceDetected);
        let event = outcome.event.unwrap();
        assert_eq!(event.message, "No face detected");
        assert_eq!(event.ear, 0.0);
    }

    #[test]
    fn test_yaw_attached_only_when_head_pose_enabled() {
        let sample = MetricSample::Metrics {
            ear: 0.30,
            mar: 0.9,
            angles: Some((0.0, 42.0, 0.0)),
        };

        let mut disabled = Pipeline::new(TrackerConfig::default());
        let event = disabled.process(&sample).event.unwrap();
        assert!(event.yaw.is_none());

        let mut enabled = Pipeline::new(TrackerConfig {
            enable_head_pose_detection: true,
            ..Default::default()
        });
        let event = enabled.process(&sample).event.unwrap();
        assert_eq!(event.yaw, Some(42.0));
    }
}
