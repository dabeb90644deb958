//! Power (jump) station scorer
//!
//! Vertical jump quality from the torso-box center-of-mass trajectory.
//! Image y grows downward, so the standing baseline is the series maximum
//! and the airborne peak the minimum.

use std::collections::BTreeMap;

use super::kinematics;
use super::normalize::{
    round2, round4, POWER_COM_STABILITY, POWER_JUMP_HEIGHT_PX, POWER_SWAY_CONTROL,
    POWER_TORSO_STABILITY,
};
use super::series::{self, Track};
use super::AnalysisError;
use crate::extract::PoseClip;
use crate::models::StationResult;

/// How far (normalized units) above baseline counts as airborne
const HANG_TIME_SLACK: f64 = 0.05;

/// Jump height is reported in scaled pixels
const JUMP_HEIGHT_SCALE: f64 = 1000.0;

/// Score a jump-and-hold clip
pub fn analyze(clip: &PoseClip) -> Result<StationResult, AnalysisError> {
    let com = Track::from_clip(clip, series::torso_com)?;
    if com.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            series: "center of mass",
            count: com.len(),
            required: 2,
        });
    }

    let com_x = com.x();
    let com_y = com.y();

    // Jump height: lowest standing point minus highest airborne point
    let baseline_y = com_y.values.iter().cloned().fold(f64::MIN, f64::max);
    let peak_y = com_y.values.iter().cloned().fold(f64::MAX, f64::min);
    let jump_height = baseline_y - peak_y;
    let jump_height_px = jump_height * JUMP_HEIGHT_SCALE;

    // Takeoff velocity: up is negative in screen space
    let vertical_velocity = kinematics::derivative(&com_y, "vertical velocity")?;
    let takeoff_velocity = vertical_velocity
        .values
        .iter()
        .cloned()
        .fold(f64::MAX, f64::min)
        .abs();

    let airborne = com_y
        .values
        .iter()
        .filter(|&&y| y < baseline_y - HANG_TIME_SLACK)
        .count();
    let hang_time = airborne as f64 / clip.fps();

    // Hold-phase stability over the trailing 30% of the series
    let hold_start = com.len() * 7 / 10;
    let hold_x = &com_x.values[hold_start..];
    let hold_y = &com_y.values[hold_start..];
    let sway = kinematics::std_dev(hold_x);

    let torso_stability = POWER_TORSO_STABILITY.score(1.0 - kinematics::variance(&com_x.values));
    let com_stability = POWER_COM_STABILITY.score(1.0 - kinematics::variance(hold_y));
    let sway_control = POWER_SWAY_CONTROL.score(1.0 - sway);

    let mut metrics = BTreeMap::new();
    metrics.insert("max_jump_height_px".to_string(), round2(jump_height_px));
    metrics.insert("hip_vertical_range".to_string(), round4(jump_height));
    metrics.insert("takeoff_velocity".to_string(), round2(takeoff_velocity));
    metrics.insert("hang_time_sec".to_string(), round2(hang_time));
    metrics.insert("balance_score".to_string(), round2(sway_control));
    metrics.insert("torso_stability".to_string(), round2(torso_stability));
    metrics.insert("com_stability".to_string(), round2(com_stability));
    metrics.insert("sway_control".to_string(), round2(sway_control));
    metrics.insert(
        "detection_coverage".to_string(),
        round4(clip.detection_coverage()),
    );

    // The station score is the jump-height normalization; the balance
    // breakdown is diagnostic detail.
    let score = round2(POWER_JUMP_HEIGHT_PX.score(jump_height_px));

    Ok(StationResult { score, metrics })
}
