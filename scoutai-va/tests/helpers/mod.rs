//! Shared helpers for integration tests
//!
//! Synthetic clip builders and a stub extractor so tests exercise the
//! pipeline and HTTP surface without video files or a sidecar tool.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;

use scoutai_va::extract::{
    ExtractError, FrameSample, Keypoint, Landmarks, LandmarkExtractor, PoseClip,
};

/// A full-body frame with every tracked keypoint placed rigidly around the
/// hip center, so all three stations can consume the same clip
pub fn full_body_frame(timestamp: f64, hip_x: f64, hip_y: f64) -> FrameSample {
    let mut lm: Landmarks = HashMap::new();
    lm.insert(Keypoint::LeftShoulder, [hip_x - 0.08, hip_y - 0.25]);
    lm.insert(Keypoint::RightShoulder, [hip_x + 0.08, hip_y - 0.25]);
    lm.insert(Keypoint::LeftWrist, [hip_x - 0.25, hip_y - 0.10]);
    lm.insert(Keypoint::RightWrist, [hip_x + 0.25, hip_y - 0.10]);
    lm.insert(Keypoint::LeftHip, [hip_x - 0.03, hip_y]);
    lm.insert(Keypoint::RightHip, [hip_x + 0.03, hip_y]);
    lm.insert(Keypoint::LeftAnkle, [hip_x - 0.05, hip_y + 0.30]);
    lm.insert(Keypoint::RightAnkle, [hip_x + 0.05, hip_y + 0.30]);
    FrameSample {
        timestamp,
        landmarks: Some(lm),
    }
}

/// A clip whose hip center follows the given (x, y) positions at `fps`
pub fn body_clip(fps: f64, positions: &[(f64, f64)]) -> PoseClip {
    let frames = positions
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| full_body_frame(i as f64 / fps, x, y))
        .collect();
    PoseClip::new(fps, frames).unwrap()
}

/// A clip where pose detection failed on every frame
pub fn undetected_clip(fps: f64, frame_count: usize) -> PoseClip {
    let frames = (0..frame_count)
        .map(|i| FrameSample {
            timestamp: i as f64 / fps,
            landmarks: None,
        })
        .collect();
    PoseClip::new(fps, frames).unwrap()
}

/// A goalkeeping dive: still start, then a lateral burst with arm reach
pub fn dive_positions(frames: usize) -> Vec<(f64, f64)> {
    (0..frames)
        .map(|i| {
            let progress = if i < frames / 3 {
                0.0
            } else {
                (i - frames / 3) as f64 / (frames - frames / 3) as f64
            };
            (0.30 + 0.45 * progress, 0.55 + 0.05 * progress)
        })
        .collect()
}

/// A symmetric jump arc: hips descend from `top` to `bottom` and back,
/// touching `bottom` exactly at the midpoint
pub fn jump_positions(frames: usize, top: f64, bottom: f64) -> Vec<(f64, f64)> {
    let mid = (frames - 1) / 2;
    (0..frames)
        .map(|i| {
            let phase = if i <= mid {
                i as f64 / mid as f64
            } else {
                (frames - 1 - i) as f64 / (frames - 1 - mid) as f64
            };
            (0.5, top - (top - bottom) * phase)
        })
        .collect()
}

/// A shuttle sprint with stride bounce: out-and-back x, oscillating y
pub fn sprint_positions(frames: usize) -> Vec<(f64, f64)> {
    (0..frames)
        .map(|i| {
            let half = frames / 2;
            let x = if i < half {
                0.1 + 0.05 * i as f64
            } else {
                0.1 + 0.05 * half as f64 - 0.05 * (i - half) as f64
            };
            let y = 0.60 + if i % 2 == 0 { 0.0 } else { 0.015 };
            (x, y)
        })
        .collect()
}

/// Extractor stub returning a canned clip for any path
pub struct StubExtractor {
    clip: PoseClip,
}

impl StubExtractor {
    pub fn new(clip: PoseClip) -> Self {
        Self { clip }
    }
}

impl LandmarkExtractor for StubExtractor {
    fn extract(&self, _video: &Path) -> Result<PoseClip, ExtractError> {
        Ok(self.clip.clone())
    }
}
