//! Assessment result types
//!
//! A `StationResult` is one clip's scored outcome; an `Assessment` bundles
//! the three stations with the overall score and tier. Both are immutable
//! once built; a correction means a new assessment row, never an update.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One station's scored outcome
///
/// `score` is the station's primary 0-100 score; `metrics` holds named
/// 0-100 sub-scores plus raw diagnostic values. Ordered map so repeated
/// runs serialize identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationResult {
    pub score: f64,
    pub metrics: BTreeMap<String, f64>,
}

/// Discrete letter grade bucketed from the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    A,
    B,
    C,
    D,
}

impl Tier {
    /// Bucket an overall score; boundaries are inclusive on the lower end
    pub fn from_score(score: f64) -> Tier {
        if score >= 90.0 {
            Tier::A
        } else if score >= 75.0 {
            Tier::B
        } else if score >= 60.0 {
            Tier::C
        } else {
            Tier::D
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
        }
    }

    pub fn parse(value: &str) -> Option<Tier> {
        match value {
            "A" => Some(Tier::A),
            "B" => Some(Tier::B),
            "C" => Some(Tier::C),
            "D" => Some(Tier::D),
            _ => None,
        }
    }

    /// Human-readable tier label
    pub fn label(&self) -> &'static str {
        match self {
            Tier::A => "Elite Pro",
            Tier::B => "High Potential",
            Tier::C => "Developing",
            Tier::D => "Grassroots",
        }
    }
}

/// Complete persisted assessment for one athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub assessment_id: Uuid,
    pub athlete: String,
    /// Station name ("goalkeeping" / "power" / "speed") -> result
    pub stations: BTreeMap<String, StationResult>,
    /// Six scouting categories projected from station scores
    pub metrics: BTreeMap<String, f64>,
    pub overall_score: f64,
    pub tier: Tier,
    pub created_at: DateTime<Utc>,
}
