//! API request and response types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Assessment, StationResult};

/// POST /analyze request
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    /// Publicly fetchable clip URL
    pub video_url: String,
    /// Station name: "goalkeeping" | "power" | "speed"
    pub station: String,
    /// Athlete identifier
    pub athlete: String,
}

/// Outcome of one station's analysis
///
/// A failed station is a structured error payload alongside the successful
/// ones, never an unhandled fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StationOutcome {
    Scored(StationResult),
    Failed { error: String },
}

impl StationOutcome {
    pub fn result(&self) -> Option<&StationResult> {
        match self {
            StationOutcome::Scored(result) => Some(result),
            StationOutcome::Failed { .. } => None,
        }
    }
}

/// POST /analyze response
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub athlete: String,
    pub station: String,
    pub analysis: StationOutcome,
}

/// Clip URLs for a full three-station assessment
#[derive(Debug, Clone, Deserialize)]
pub struct ClipUrls {
    pub goalkeeping: String,
    pub power: String,
    pub speed: String,
}

/// POST /assess request
#[derive(Debug, Clone, Deserialize)]
pub struct AssessRequest {
    pub athlete: String,
    pub clips: ClipUrls,
}

/// POST /assess response
///
/// `assessment` is present only when all three stations scored; failed
/// stations keep their error payloads in `stations` and nothing is
/// persisted or fabricated in their place.
#[derive(Debug, Clone, Serialize)]
pub struct AssessResponse {
    pub athlete: String,
    pub stations: BTreeMap<String, StationOutcome>,
    pub assessment: Option<Assessment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_failed_outcome_serializes_as_error_object() {
        let outcome = StationOutcome::Failed {
            error: "No pose detected".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "No pose detected" }));
    }

    #[test]
    fn test_scored_outcome_serializes_flat() {
        let outcome = StationOutcome::Scored(StationResult {
            score: 71.5,
            metrics: BTreeMap::from([("hang_time_sec".to_string(), 0.4)]),
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["score"], 71.5);
        assert_eq!(json["metrics"]["hang_time_sec"], 0.4);
    }
}
