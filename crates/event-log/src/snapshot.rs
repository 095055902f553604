//! Snapshot artifact policy

use chrono::Local;
use driver_state::DriverState;
use std::path::PathBuf;
use tracing::{debug, error};

/// Decoded RGB frame handed over by the vision pipeline
#[derive(Debug, Clone)]
pub struct FrameImage {
    /// RGB pixel data (width * height * 3)
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl FrameImage {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }
}

/// Decides per event whether to persist an image artifact.
///
/// Policy: every notable state gets a snapshot when snapshotting is enabled.
/// Write failures are reported and yield no path; they are never fatal.
#[derive(Debug, Clone)]
pub struct SnapshotPolicy {
    enabled: bool,
    directory: PathBuf,
}

impl SnapshotPolicy {
    pub fn new(enabled: bool, directory: impl Into<PathBuf>) -> Self {
        Self {
            enabled,
            directory: directory.into(),
        }
    }

    /// Persist the frame if the policy applies, returning the artifact path
    pub fn store(&self, frame: &FrameImage, state: DriverState) -> Option<String> {
        if !self.enabled || !state.is_notable() {
            return None;
        }

        let path = self
            .directory
            .join(format!("drowsy_detected_{}.jpg", file_timestamp()));

        let image = match image::RgbImage::from_raw(frame.width, frame.height, frame.data.clone())
        {
            Some(image) => image,
            None => {
                error!(
                    width = frame.width,
                    height = frame.height,
                    len = frame.data.len(),
                    "snapshot skipped, frame buffer does not match its dimensions"
                );
                return None;
            }
        };

        match image.save(&path) {
            Ok(()) => {
                debug!(path = %path.display(), %state, "snapshot stored");
                Some(path.to_string_lossy().into_owned())
            }
            Err(e) => {
                error!(path = %path.display(), "snapshot write failed: {e}");
                None
            }
        }
    }
}

/// Millisecond-resolution timestamp suffix, collision-resistant across frames
fn file_timestamp() -> String {
    Local::now().format("%b%d_%Y_%Hh%Mm%Ss_%3f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn frame() -> FrameImage {
        // 2x2 solid red frame
        FrameImage::new(vec![255, 0, 0, 255, 0, 0, 255, 0, 0, 255, 0, 0], 2, 2)
    }

    #[test]
    fn test_disabled_policy_stores_nothing() {
        let dir = TempDir::new().unwrap();
        let policy = SnapshotPolicy::new(false, dir.path());
        assert!(policy.store(&frame(), DriverState::Drowsy).is_none());
    }

    #[test]
    fn test_quiet_state_stores_nothing() {
        let dir = TempDir::new().unwrap();
        let policy = SnapshotPolicy::new(true, dir.path());
        assert!(policy.store(&frame(), DriverState::Alert).is_none());
    }

    #[test]
    fn test_notable_state_writes_jpeg() {
        let dir = TempDir::new().unwrap();
        let policy = SnapshotPolicy::new(true, dir.path());

        let path = policy.store(&frame(), DriverState::DrowsyYawning).unwrap();
        assert!(path.ends_with(".jpg"));
        assert!(std::path::Path::new(&path).exists());
    }

    #[test]
    fn test_mismatched_buffer_reports_and_skips() {
        let dir = TempDir::new().unwrap();
        let policy = SnapshotPolicy::new(true, dir.path());

        let bad = FrameImage::new(vec![0; 5], 2, 2);
        assert!(policy.store(&bad, DriverState::Drowsy).is_none());
    }

    #[test]
    fn test_missing_directory_reports_and_skips() {
        let policy = SnapshotPolicy::new(true, "/nonexistent/snapshot/dir");
        assert!(policy.store(&frame(), DriverState::Drowsy).is_none());
    }
}
