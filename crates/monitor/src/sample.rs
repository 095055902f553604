//! Metric sample ingestion
//!
//! Samples arrive as CSV lines, one per frame:
//! - `ear,mar` — metrics without head pose
//! - `ear,mar,pitch,yaw,roll` — metrics with head-pose angles (degrees)
//! - `-` (or an empty line) — no face detected this frame

use std::str::FromStr;
use thiserror::Error;

/// Sample parse error types
#[derive(Error, Debug, PartialEq)]
pub enum SampleParseError {
    #[error("Expected 2 or 5 fields, got {0}")]
    FieldCount(usize),

    #[error("Invalid number '{0}'")]
    Number(String),
}

/// One frame's worth of signals from the vision oracle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricSample {
    /// The oracle found no face in this frame
    NoFace,
    /// Per-frame metrics, with optional (pitch, yaw, roll) angles
    Metrics {
        ear: f64,
        mar: f64,
        angles: Option<(f64, f64, f64)>,
    },
}

impl FromStr for MetricSample {
    type Err = SampleParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() || line == "-" {
            return Ok(MetricSample::NoFace);
        }

        let fields: Vec<f64> = line
            .split(',')
            .map(|field| {
                let field = field.trim();
                f64::from_str(field).map_err(|_| SampleParseError::Number(field.to_string()))
            })
            .collect::<Result<_, _>>()?;

        match fields[..] {
            [ear, mar] => Ok(MetricSample::Metrics {
                ear,
                mar,
                angles: None,
            }),
            [ear, mar, pitch, yaw, roll] => Ok(MetricSample::Metrics {
                ear,
                mar,
                angles: Some((pitch, yaw, roll)),
            }),
            _ => Err(SampleParseError::FieldCount(fields.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metrics_only() {
        assert_eq!(
            "0.25, 0.7".parse::<MetricSample>().unwrap(),
            MetricSample::Metrics {
                ear: 0.25,
                mar: 0.7,
                angles: None
            }
        );
    }

    #[test]
    fn test_parse_with_pose() {
        assert_eq!(
            "0.25,0.7,-5.0,40.0,1.5".parse::<MetricSample>().unwrap(),
            MetricSample::Metrics {
                ear: 0.25,
                mar: 0.7,
                angles: Some((-5.0, 40.0, 1.5))
            }
        );
    }

    #[test]
    fn test_parse_no_face() {
        assert_eq!("-".parse::<MetricSample>().unwrap(), MetricSample::NoFace);
        assert_eq!("  ".parse::<MetricSample>().unwrap(), MetricSample::NoFace);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "0.25".parse::<MetricSample>(),
            Err(SampleParseError::FieldCount(1))
        );
        assert_eq!(
            "0.25,x".parse::<MetricSample>(),
            Err(SampleParseError::Number("x".to_string()))
        );
    }
}
