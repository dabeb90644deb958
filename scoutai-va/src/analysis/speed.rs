//! Speed station scorer
//!
//! Sprint, agility and stamina proxies from the hip-center trajectory:
//! horizontal velocity and acceleration, stride oscillations in the
//! vertical signal, direction changes, and first-half/second-half
//! intensity maintenance.

use std::collections::BTreeMap;

use super::kinematics;
use super::normalize::{
    round2, round4, SPEED_AVG_VELOCITY, SPEED_FATIGUE_RESISTANCE, SPEED_LATERAL_VELOCITY,
    SPEED_MAX_ACCELERATION, SPEED_MAX_VELOCITY, SPEED_STAMINA_MAINTENANCE,
    SPEED_STRIDE_FREQUENCY, SPEED_TURN_RATE, SPEED_VELOCITY_SPREAD,
};
use super::series::{self, Track};
use super::AnalysisError;
use crate::extract::PoseClip;
use crate::models::StationResult;

/// Guards the stamina ratio against a motionless first half
const STAMINA_EPSILON: f64 = 1e-6;

/// Score a sprint/shuttle clip
pub fn analyze(clip: &PoseClip) -> Result<StationResult, AnalysisError> {
    let hip = Track::from_clip(clip, series::hip_center)?;
    if hip.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            series: "hip center",
            count: hip.len(),
            required: 2,
        });
    }

    let hip_x = hip.x();
    let hip_y = hip.y();

    let velocity = kinematics::derivative(&hip_x, "hip velocity")?;
    let acceleration = kinematics::derivative(&velocity, "hip acceleration")?;

    // Sprint features
    let displacement = kinematics::range(&hip_x.values);
    let speed_estimate = displacement * clip.fps();
    let max_velocity = kinematics::max_abs(&velocity.values);
    let avg_velocity = kinematics::mean_abs(&velocity.values);
    let max_acceleration = kinematics::max_abs(&acceleration.values);

    // Stride frequency: vertical CoM oscillations per second
    let duration = hip_x.duration();
    let stride_frequency = kinematics::local_maxima_count(&hip_y.values) as f64 / duration;

    // Agility: velocity sign flips per second, and lateral drift
    let turn_rate = kinematics::sign_change_count(&velocity.values) as f64 / duration;
    let lateral_velocity =
        kinematics::mean_abs(&kinematics::derivative(&hip_y, "lateral velocity")?.values);

    // Stamina: does the second half keep the first half's intensity
    let mid = velocity.len() / 2;
    let stamina_maintenance = kinematics::mean_abs(&velocity.values[mid..])
        / (kinematics::mean_abs(&velocity.values[..mid]) + STAMINA_EPSILON);
    let speeds: Vec<f64> = velocity.values.iter().map(|v| v.abs()).collect();
    let velocity_spread = kinematics::std_dev(&speeds);

    let mut metrics = BTreeMap::new();
    metrics.insert("horizontal_displacement".to_string(), round4(displacement));
    metrics.insert("speed_estimate".to_string(), round4(speed_estimate));
    metrics.insert(
        "max_velocity".to_string(),
        round2(SPEED_MAX_VELOCITY.score(max_velocity)),
    );
    metrics.insert(
        "acceleration".to_string(),
        round2(SPEED_MAX_ACCELERATION.score(max_acceleration)),
    );
    metrics.insert(
        "stride_frequency".to_string(),
        round2(SPEED_STRIDE_FREQUENCY.score(stride_frequency)),
    );
    metrics.insert("avg_velocity_raw".to_string(), round2(avg_velocity));
    metrics.insert(
        "direction_change_rate".to_string(),
        round2(SPEED_TURN_RATE.score(turn_rate)),
    );
    metrics.insert(
        "lateral_velocity".to_string(),
        round2(SPEED_LATERAL_VELOCITY.score(lateral_velocity)),
    );
    metrics.insert(
        "stamina_maintenance".to_string(),
        round2(SPEED_STAMINA_MAINTENANCE.score(stamina_maintenance)),
    );
    metrics.insert(
        "fatigue_resistance".to_string(),
        round2(SPEED_FATIGUE_RESISTANCE.score(stamina_maintenance)),
    );
    metrics.insert(
        "stride_consistency".to_string(),
        round2(SPEED_VELOCITY_SPREAD.score_inverted(velocity_spread)),
    );
    metrics.insert(
        "detection_coverage".to_string(),
        round4(clip.detection_coverage()),
    );

    let score = round2(SPEED_AVG_VELOCITY.score(avg_velocity));

    Ok(StationResult { score, metrics })
}
