//! Time-debounced state tracker

use crate::config::TrackerConfig;
use crate::pose::{HeadDirection, HeadPose};
use crate::state::DriverState;
use std::time::{Duration, Instant};
use tracing::debug;

/// Per-driver state tracker.
///
/// Holds the debounce timers for eye closure and distraction. The returned
/// state is recomputed fresh from the current signals and timer state on
/// every call; the previous state never feeds back into a transition.
#[derive(Debug)]
pub struct StateTracker {
    config: TrackerConfig,
    eyes_closed_since: Option<Instant>,
    distraction_since: Option<Instant>,
    last_state: DriverState,
}

impl StateTracker {
    /// Create a tracker with the given thresholds
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            eyes_closed_since: None,
            distraction_since: None,
            last_state: DriverState::Alert,
        }
    }

    /// Update with the current frame's signals, using the wall clock
    pub fn update(&mut self, ear: f64, mar: f64, pose: Option<&HeadPose>) -> DriverState {
        self.update_at(Instant::now(), ear, mar, pose)
    }

    /// Update with an explicit clock, for replaying recorded sessions
    pub fn update_at(
        &mut self,
        now: Instant,
        ear: f64,
        mar: f64,
        pose: Option<&HeadPose>,
    ) -> DriverState {
        let drowsy = self.check_drowsiness(now, ear);
        let yawning = mar > self.config.mar_threshold;
        let distracted = self.check_distraction(now, pose);

        let state = combine(drowsy, yawning, distracted);
        if state != self.last_state {
            debug!(from = %self.last_state, to = %state, "driver state changed");
        }
        self.last_state = state;
        state
    }

    /// How long the eyes have been continuously closed, zero if open
    pub fn eyes_closed_duration(&self, now: Instant) -> Duration {
        self.eyes_closed_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or(Duration::ZERO)
    }

    /// How long the driver has been continuously looking away, zero if forward
    pub fn distraction_duration(&self, now: Instant) -> Duration {
        self.distraction_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or(Duration::ZERO)
    }

    /// The state returned by the most recent update
    pub fn last_state(&self) -> DriverState {
        self.last_state
    }

    fn check_drowsiness(&mut self, now: Instant, ear: f64) -> bool {
        if ear < self.config.ear_threshold {
            match self.eyes_closed_since {
                None => {
                    // First sub-threshold frame starts the timer; drowsiness
                    // requires sustained closure, so this frame is not drowsy.
                    self.eyes_closed_since = Some(now);
                    false
                }
                Some(since) => {
                    now.saturating_duration_since(since)
                        >= Duration::from_secs_f64(self.config.drowsy_time_seconds)
                }
            }
        } else {
            // Any eye-opening resets the debounce
            self.eyes_closed_since = None;
            false
        }
    }

    fn check_distraction(&mut self, now: Instant, pose: Option<&HeadPose>) -> bool {
        if !self.config.enable_head_pose_detection {
            self.distraction_since = None;
            return false;
        }

        let looking_away = match pose {
            // Invalid pose is treated as forward, never as a continued look-away
            Some(p) if p.valid => p.direction != HeadDirection::Forward,
            _ => false,
        };

        if looking_away {
            match self.distraction_since {
                None => {
                    self.distraction_since = Some(now);
                    false
                }
                Some(since) => {
                    now.saturating_duration_since(since)
                        >= Duration::from_secs_f64(self.config.distraction_time_seconds)
                }
            }
        } else {
            self.distraction_since = None;
            false
        }
    }
}

/// Combine the debounced signal booleans by fixed severity priority
fn combine(drowsy: bool, yawning: bool, distracted: bool) -> DriverState {
    if drowsy && distracted {
        DriverState::DrowsyDistracted
    } else if drowsy && yawning {
        DriverState::DrowsyYawning
    } else if drowsy {
        DriverState::Drowsy
    } else if distracted {
        DriverState::Distracted
    } else if yawning {
        DriverState::Yawning
    } else {
        DriverState::Alert
    }
}
