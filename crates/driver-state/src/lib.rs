//! Driver state machine
//!
//! Converts per-frame physiological signals into a debounced driver state:
//! - Eye-aspect ratio (EAR) -> sustained-closure drowsiness
//! - Mouth-aspect ratio (MAR) -> yawning
//! - Head pose -> sustained look-away distraction
//!
//! Debouncing is time-based rather than frame-counted, so the state machine
//! behaves identically at any frame rate.

pub mod config;
pub mod pose;
pub mod state;
pub mod tracker;

pub use config::{PoseThresholds, TrackerConfig};
pub use pose::{HeadDirection, HeadPose};
pub use state::DriverState;
pub use tracker::StateTracker;
