//! Time-series signal building
//!
//! Converts a raw landmark stream into named series aligned by timestamp.
//! Only frames with a successful detection contribute samples; failed frames
//! are skipped, not interpolated, so consecutive samples may span more than
//! one frame interval. Derivatives downstream divide by actual timestamp
//! deltas, which keeps them correct under skipped frames.

use super::AnalysisError;
use crate::extract::{Keypoint, Landmarks, PoseClip};

/// Ordered (timestamp, value) samples for one scalar quantity
///
/// Invariant: timestamps strictly increasing (inherited from the clip).
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub times: Vec<f64>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert_eq!(times.len(), values.len());
        Self { times, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Elapsed time covered by the series (0 for fewer than 2 samples)
    pub fn duration(&self) -> f64 {
        match (self.times.first(), self.times.last()) {
            (Some(first), Some(last)) if self.times.len() > 1 => last - first,
            _ => 0.0,
        }
    }
}

/// Ordered (timestamp, point) samples for one tracked 2-D quantity
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub times: Vec<f64>,
    pub points: Vec<[f64; 2]>,
}

impl Track {
    pub fn new(times: Vec<f64>, points: Vec<[f64; 2]>) -> Self {
        debug_assert_eq!(times.len(), points.len());
        Self { times, points }
    }

    /// Build a track from the clip, one sample per frame where `select`
    /// yields a point
    ///
    /// Frames with no detection, or missing the keypoints `select` needs,
    /// do not appear in the track. Zero usable frames is "No pose detected".
    pub fn from_clip<F>(clip: &PoseClip, select: F) -> Result<Track, AnalysisError>
    where
        F: Fn(&Landmarks) -> Option<[f64; 2]>,
    {
        let mut times = Vec::new();
        let mut points = Vec::new();
        for frame in clip.frames() {
            if let Some(landmarks) = &frame.landmarks {
                if let Some(point) = select(landmarks) {
                    times.push(frame.timestamp);
                    points.push(point);
                }
            }
        }
        if times.is_empty() {
            return Err(AnalysisError::NoPoseDetected);
        }
        Ok(Track::new(times, points))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Horizontal component as a scalar series
    pub fn x(&self) -> TimeSeries {
        TimeSeries::new(self.times.clone(), self.points.iter().map(|p| p[0]).collect())
    }

    /// Vertical component as a scalar series
    pub fn y(&self) -> TimeSeries {
        TimeSeries::new(self.times.clone(), self.points.iter().map(|p| p[1]).collect())
    }
}

/// Look up one keypoint
pub fn point(landmarks: &Landmarks, key: Keypoint) -> Option<[f64; 2]> {
    landmarks.get(&key).copied()
}

/// Midpoint of two points (hip center, shoulder center)
pub fn midpoint(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
    [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0]
}

/// Euclidean distance between two points
pub fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

/// Hip-center point (mid-hip), if both hips were detected
pub fn hip_center(landmarks: &Landmarks) -> Option<[f64; 2]> {
    let left = point(landmarks, Keypoint::LeftHip)?;
    let right = point(landmarks, Keypoint::RightHip)?;
    Some(midpoint(left, right))
}

/// Torso-box center-of-mass proxy: average of hips and shoulders
///
/// Not a mass-weighted centroid; a deliberate approximation.
pub fn torso_com(landmarks: &Landmarks) -> Option<[f64; 2]> {
    let l_hip = point(landmarks, Keypoint::LeftHip)?;
    let r_hip = point(landmarks, Keypoint::RightHip)?;
    let l_shoulder = point(landmarks, Keypoint::LeftShoulder)?;
    let r_shoulder = point(landmarks, Keypoint::RightShoulder)?;
    Some([
        (l_hip[0] + r_hip[0] + l_shoulder[0] + r_shoulder[0]) / 4.0,
        (l_hip[1] + r_hip[1] + l_shoulder[1] + r_shoulder[1]) / 4.0,
    ])
}
