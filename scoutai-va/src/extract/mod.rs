//! Pose landmark extraction boundary
//!
//! The video decoder and pose model live outside this service. This module
//! defines the data that crosses the boundary (per-frame keypoint samples)
//! and the `LandmarkExtractor` seam the pipeline consumes. The production
//! implementation shells out to a landmarker sidecar tool; tests substitute
//! synthetic clips.

pub mod landmarker;

pub use landmarker::PoseLandmarker;

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Landmark extraction errors
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Video file not found at path
    #[error("Video file not found: {0}")]
    FileNotFound(String),

    /// Landmarker binary not found in PATH
    #[error("Pose landmarker binary not found: {0}")]
    BinaryNotFound(String),

    /// Failed to execute the landmarker command
    #[error("Failed to execute pose landmarker: {0}")]
    ExecutionError(String),

    /// Landmarker ran but reported failure
    #[error("Pose extraction failed: {0}")]
    ExtractionFailed(String),

    /// Failed to parse landmarker JSON output
    #[error("Failed to parse landmarker output: {0}")]
    ParseError(String),

    /// Output parsed but violates clip invariants
    #[error("Invalid clip: {0}")]
    InvalidClip(String),

    /// I/O error (output file read/write)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Body keypoints the stations consume
///
/// A subset of the landmarker's full skeleton; anything else in the sidecar
/// output is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keypoint {
    LeftShoulder,
    RightShoulder,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftAnkle,
    RightAnkle,
}

impl Keypoint {
    /// Keypoint name as it appears in landmarker output
    pub fn as_str(&self) -> &'static str {
        match self {
            Keypoint::LeftShoulder => "left_shoulder",
            Keypoint::RightShoulder => "right_shoulder",
            Keypoint::LeftWrist => "left_wrist",
            Keypoint::RightWrist => "right_wrist",
            Keypoint::LeftHip => "left_hip",
            Keypoint::RightHip => "right_hip",
            Keypoint::LeftAnkle => "left_ankle",
            Keypoint::RightAnkle => "right_ankle",
        }
    }

    /// Parse a landmarker keypoint name; unknown names return None
    pub fn from_name(name: &str) -> Option<Keypoint> {
        match name {
            "left_shoulder" => Some(Keypoint::LeftShoulder),
            "right_shoulder" => Some(Keypoint::RightShoulder),
            "left_wrist" => Some(Keypoint::LeftWrist),
            "right_wrist" => Some(Keypoint::RightWrist),
            "left_hip" => Some(Keypoint::LeftHip),
            "right_hip" => Some(Keypoint::RightHip),
            "left_ankle" => Some(Keypoint::LeftAnkle),
            "right_ankle" => Some(Keypoint::RightAnkle),
            _ => None,
        }
    }
}

/// Keypoint positions in normalized [0,1] image coordinates
pub type Landmarks = HashMap<Keypoint, [f64; 2]>;

/// One video frame's detection outcome
///
/// `landmarks` is None when pose detection failed for the frame. Failed
/// frames are kept in the clip (they count toward detection coverage) but
/// contribute no samples downstream.
#[derive(Debug, Clone)]
pub struct FrameSample {
    /// Timestamp in seconds, derived from frame index / frame rate
    pub timestamp: f64,
    /// Detected keypoints, absent if detection failed
    pub landmarks: Option<Landmarks>,
}

/// Complete per-clip landmark stream with the source frame rate
#[derive(Debug, Clone)]
pub struct PoseClip {
    fps: f64,
    frames: Vec<FrameSample>,
}

impl PoseClip {
    /// Build a clip, validating the timestamp invariant
    ///
    /// Timestamps must be strictly increasing and the frame rate positive;
    /// a violating stream is rejected rather than silently reordered.
    pub fn new(fps: f64, frames: Vec<FrameSample>) -> Result<Self, ExtractError> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(ExtractError::InvalidClip(format!(
                "non-positive frame rate: {}",
                fps
            )));
        }
        for pair in frames.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(ExtractError::InvalidClip(format!(
                    "timestamps not strictly increasing at {}s",
                    pair[1].timestamp
                )));
            }
        }
        Ok(Self { fps, frames })
    }

    /// Source frame rate in frames per second
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// All frame samples, including frames with failed detection
    pub fn frames(&self) -> &[FrameSample] {
        &self.frames
    }

    /// Fraction of frames with a successful detection (0.0 to 1.0)
    ///
    /// Diagnostic only: a low ratio never blocks analysis.
    pub fn detection_coverage(&self) -> f64 {
        if self.frames.is_empty() {
            return 0.0;
        }
        let detected = self
            .frames
            .iter()
            .filter(|f| f.landmarks.is_some())
            .count();
        detected as f64 / self.frames.len() as f64
    }
}

/// Landmark extraction seam
///
/// Constructed once per process from configuration and injected into the
/// handlers; implementations must not rely on ambient global state.
pub trait LandmarkExtractor: Send + Sync {
    /// Decode the clip at `video` and produce its landmark stream
    fn extract(&self, video: &Path) -> Result<PoseClip, ExtractError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(t: f64) -> FrameSample {
        FrameSample {
            timestamp: t,
            landmarks: Some(HashMap::from([(Keypoint::LeftHip, [0.5, 0.5])])),
        }
    }

    #[test]
    fn test_clip_rejects_non_increasing_timestamps() {
        let result = PoseClip::new(30.0, vec![frame(0.0), frame(0.0)]);
        assert!(matches!(result, Err(ExtractError::InvalidClip(_))));
    }

    #[test]
    fn test_clip_rejects_zero_fps() {
        let result = PoseClip::new(0.0, vec![frame(0.0)]);
        assert!(matches!(result, Err(ExtractError::InvalidClip(_))));
    }

    #[test]
    fn test_detection_coverage() {
        let frames = vec![
            frame(0.0),
            FrameSample {
                timestamp: 1.0 / 30.0,
                landmarks: None,
            },
            frame(2.0 / 30.0),
            frame(3.0 / 30.0),
        ];
        let clip = PoseClip::new(30.0, frames).unwrap();
        assert!((clip.detection_coverage() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_keypoint_name_roundtrip() {
        for kp in [
            Keypoint::LeftShoulder,
            Keypoint::RightShoulder,
            Keypoint::LeftWrist,
            Keypoint::RightWrist,
            Keypoint::LeftHip,
            Keypoint::RightHip,
            Keypoint::LeftAnkle,
            Keypoint::RightAnkle,
        ] {
            assert_eq!(Keypoint::from_name(kp.as_str()), Some(kp));
        }
        assert_eq!(Keypoint::from_name("nose"), None);
    }
}
