//! Pose landmarker sidecar client
//!
//! Runs the external pose landmarker command-line tool against a clip and
//! parses its JSON output into a [`PoseClip`]. The tool decodes frames
//! sequentially, runs the pose model per frame, and writes one record per
//! frame with a timestamp and either the detected keypoints or null.
//!
//! Usage: `<binary> --model <model.task> --output <out.json> <video>`

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;

use super::{ExtractError, FrameSample, Keypoint, LandmarkExtractor, PoseClip};

/// Raw landmarker output structure
#[derive(Debug, Deserialize)]
struct RawClip {
    /// Source frame rate (frames per second)
    fps: f64,
    /// One record per decoded frame
    frames: Vec<RawFrame>,
}

/// One frame record in landmarker output
#[derive(Debug, Deserialize)]
struct RawFrame {
    /// Timestamp in seconds
    t: f64,
    /// Keypoint name -> [x, y] in normalized image coordinates,
    /// null when detection failed for the frame
    landmarks: Option<HashMap<String, [f64; 2]>>,
}

impl RawClip {
    /// Convert raw output to a validated clip, dropping unknown keypoints
    fn into_clip(self) -> Result<PoseClip, ExtractError> {
        let frames = self
            .frames
            .into_iter()
            .map(|raw| FrameSample {
                timestamp: raw.t,
                landmarks: raw.landmarks.map(|map| {
                    map.into_iter()
                        .filter_map(|(name, xy)| Keypoint::from_name(&name).map(|k| (k, xy)))
                        .collect()
                }),
            })
            .collect();
        PoseClip::new(self.fps, frames)
    }
}

/// Pose landmarker sidecar client
pub struct PoseLandmarker {
    binary_path: String,
    model_path: PathBuf,
}

impl PoseLandmarker {
    /// Create a new landmarker client
    ///
    /// Verifies the binary is runnable so a misconfigured deployment fails
    /// at startup instead of on the first request.
    pub fn new(binary_path: &str, model_path: PathBuf) -> Result<Self, ExtractError> {
        match Command::new(binary_path).arg("--version").output() {
            Ok(_) => Ok(Self {
                binary_path: binary_path.to_string(),
                model_path,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ExtractError::BinaryNotFound(binary_path.to_string()))
            }
            Err(e) => Err(ExtractError::ExecutionError(e.to_string())),
        }
    }

    /// Check if the landmarker tool is available
    pub fn is_available(binary_path: &str) -> bool {
        Command::new(binary_path).arg("--version").output().is_ok()
    }

    /// Parse landmarker JSON output text
    fn parse_output(json: &str) -> Result<PoseClip, ExtractError> {
        let raw: RawClip =
            serde_json::from_str(json).map_err(|e| ExtractError::ParseError(e.to_string()))?;
        raw.into_clip()
    }
}

impl LandmarkExtractor for PoseLandmarker {
    fn extract(&self, video: &Path) -> Result<PoseClip, ExtractError> {
        if !video.exists() {
            return Err(ExtractError::FileNotFound(video.display().to_string()));
        }

        // Temporary file for JSON output
        let temp_output =
            std::env::temp_dir().join(format!("pose_{}.json", uuid::Uuid::new_v4()));

        tracing::debug!(
            video = %video.display(),
            output = %temp_output.display(),
            "Running pose landmarker"
        );

        let output = Command::new(&self.binary_path)
            .arg("--model")
            .arg(&self.model_path)
            .arg("--output")
            .arg(&temp_output)
            .arg(video)
            .output()
            .map_err(|e| ExtractError::ExecutionError(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let _ = std::fs::remove_file(&temp_output);
            return Err(ExtractError::ExtractionFailed(format!(
                "Exit code: {:?}, stderr: {}",
                output.status.code(),
                stderr
            )));
        }

        let json = std::fs::read_to_string(&temp_output);
        let _ = std::fs::remove_file(&temp_output);
        let clip = Self::parse_output(&json?)?;

        tracing::info!(
            video = %video.display(),
            frames = clip.frames().len(),
            coverage = clip.detection_coverage(),
            "Pose extraction completed"
        );

        Ok(clip)
    }
}
