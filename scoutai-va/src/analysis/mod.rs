//! Kinematic analysis pipeline
//!
//! Turns a per-frame landmark stream into normalized, bounded performance
//! scores: signal building (`series`), derivative and feature extraction
//! (`kinematics`), range normalization (`normalize`), the three station
//! scorers, and assessment aggregation (`aggregate`).
//!
//! Data flows one way: clip -> time series -> kinematic features ->
//! normalized scores -> station result -> assessment. Every stage is a pure
//! function of its input; re-running a stage on the same clip yields an
//! identical result.
//!
//! A failure in one station's derivation aborts only that station; callers
//! report it per-station and continue with the others.

pub mod aggregate;
pub mod goalkeeping;
pub mod kinematics;
pub mod normalize;
pub mod power;
pub mod series;
pub mod speed;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::PoseClip;
use crate::models::StationResult;

/// Station-level analysis errors
///
/// These surface to the caller as structured per-station error payloads,
/// never as unhandled faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Zero frames in the clip produced a detection
    #[error("No pose detected")]
    NoPoseDetected,

    /// A required series has too few samples for derivative features
    #[error("Insufficient samples in {series} series: {count} (need at least {required})")]
    InsufficientData {
        series: &'static str,
        count: usize,
        required: usize,
    },

    /// A threshold-crossing feature never triggered
    #[error("No movement above the activation threshold")]
    NoActivation,
}

/// The three drill categories assessed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Station {
    Goalkeeping,
    Power,
    Speed,
}

impl Station {
    pub const ALL: [Station; 3] = [Station::Goalkeeping, Station::Power, Station::Speed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Station::Goalkeeping => "goalkeeping",
            Station::Power => "power",
            Station::Speed => "speed",
        }
    }

    /// Parse a station name from a request; unknown names return None
    pub fn parse(name: &str) -> Option<Station> {
        match name {
            "goalkeeping" => Some(Station::Goalkeeping),
            "power" => Some(Station::Power),
            "speed" => Some(Station::Speed),
            _ => None,
        }
    }
}

/// Score one clip for one station
pub fn analyze_clip(station: Station, clip: &PoseClip) -> Result<StationResult, AnalysisError> {
    match station {
        Station::Goalkeeping => goalkeeping::analyze(clip),
        Station::Power => power::analyze(clip),
        Station::Speed => speed::analyze(clip),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_parse() {
        assert_eq!(Station::parse("goalkeeping"), Some(Station::Goalkeeping));
        assert_eq!(Station::parse("power"), Some(Station::Power));
        assert_eq!(Station::parse("speed"), Some(Station::Speed));
        assert_eq!(Station::parse("dribbling"), None);
        assert_eq!(Station::parse(""), None);
    }

    #[test]
    fn test_no_pose_error_message() {
        // The exact message is part of the API contract for failed stations.
        assert_eq!(AnalysisError::NoPoseDetected.to_string(), "No pose detected");
    }
}
