//! Assessment aggregation
//!
//! Combines the three station results into one overall score, a tier, and
//! the six-category scouting view. Produces an immutable `Assessment`;
//! persisting it is the caller's job.

use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;

use super::normalize::round2;
use super::Station;
use crate::models::{Assessment, StationResult, Tier};

/// Build a complete assessment from the three station results
pub fn build_assessment(
    athlete: &str,
    goalkeeping: StationResult,
    power: StationResult,
    speed: StationResult,
) -> Assessment {
    let overall_score = round2((goalkeeping.score + power.score + speed.score) / 3.0);
    let tier = Tier::from_score(overall_score);

    // Six scouting categories projected from the three station scores.
    // Intentionally coarse: each category takes the score of the station
    // carrying the closest evidence for it, not a dedicated measurement.
    let metrics = BTreeMap::from([
        ("speed".to_string(), speed.score),
        ("acceleration".to_string(), speed.score),
        ("stamina".to_string(), speed.score),
        ("agility".to_string(), power.score),
        ("balance".to_string(), power.score),
        ("technique".to_string(), goalkeeping.score),
    ]);

    let stations = BTreeMap::from([
        (Station::Goalkeeping.as_str().to_string(), goalkeeping),
        (Station::Power.as_str().to_string(), power),
        (Station::Speed.as_str().to_string(), speed),
    ]);

    Assessment {
        assessment_id: Uuid::new_v4(),
        athlete: athlete.to_string(),
        stations,
        metrics,
        overall_score,
        tier,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(score: f64) -> StationResult {
        StationResult {
            score,
            metrics: BTreeMap::new(),
        }
    }

    #[test]
    fn test_overall_is_rounded_mean() {
        let assessment =
            build_assessment("athlete-1", station(80.0), station(70.0), station(61.0));
        assert_eq!(assessment.overall_score, 70.33);
        assert_eq!(assessment.tier, Tier::C);
    }

    #[test]
    fn test_tier_from_aggregate() {
        let elite = build_assessment("a", station(90.0), station(90.0), station(90.0));
        assert_eq!(elite.tier, Tier::A);

        let low = build_assessment("a", station(50.0), station(50.0), station(50.0));
        assert_eq!(low.tier, Tier::D);
    }

    #[test]
    fn test_category_cross_mapping() {
        let assessment =
            build_assessment("athlete-1", station(81.0), station(62.0), station(43.0));
        assert_eq!(assessment.metrics["technique"], 81.0);
        assert_eq!(assessment.metrics["agility"], 62.0);
        assert_eq!(assessment.metrics["balance"], 62.0);
        assert_eq!(assessment.metrics["speed"], 43.0);
        assert_eq!(assessment.metrics["acceleration"], 43.0);
        assert_eq!(assessment.metrics["stamina"], 43.0);
        assert_eq!(assessment.metrics.len(), 6);
    }

    #[test]
    fn test_stations_keyed_by_name() {
        let assessment =
            build_assessment("athlete-1", station(1.0), station(2.0), station(3.0));
        assert_eq!(assessment.stations["goalkeeping"].score, 1.0);
        assert_eq!(assessment.stations["power"].score, 2.0);
        assert_eq!(assessment.stations["speed"].score, 3.0);
    }
}
