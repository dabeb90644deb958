//! Kinematic feature derivation
//!
//! Pure functions from time series to scalar features: finite-difference
//! derivatives, peak-to-peak range, dispersion, oscillation and
//! direction-change counts, and threshold-crossing onset detection.

use super::series::{TimeSeries, Track};
use super::AnalysisError;

/// Fraction of the peak magnitude that counts as movement onset
pub const ONSET_THRESHOLD_FRACTION: f64 = 0.10;

/// First derivative by finite differences over actual timestamp deltas
///
/// Sample i of the result covers the interval starting at the source's
/// sample i, and carries that interval-start timestamp. Needs at least two
/// samples; `name` labels the series in the error.
pub fn derivative(series: &TimeSeries, name: &'static str) -> Result<TimeSeries, AnalysisError> {
    if series.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            series: name,
            count: series.len(),
            required: 2,
        });
    }
    let mut times = Vec::with_capacity(series.len() - 1);
    let mut values = Vec::with_capacity(series.len() - 1);
    for i in 0..series.len() - 1 {
        let dt = series.times[i + 1] - series.times[i];
        times.push(series.times[i]);
        values.push((series.values[i + 1] - series.values[i]) / dt);
    }
    Ok(TimeSeries::new(times, values))
}

/// Per-interval speed of a 2-D track: displacement magnitude / dt
///
/// Same interval-start timestamp convention as [`derivative`].
pub fn track_speed(track: &Track, name: &'static str) -> Result<TimeSeries, AnalysisError> {
    if track.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            series: name,
            count: track.len(),
            required: 2,
        });
    }
    let mut times = Vec::with_capacity(track.len() - 1);
    let mut values = Vec::with_capacity(track.len() - 1);
    for i in 0..track.len() - 1 {
        let dt = track.times[i + 1] - track.times[i];
        let dx = track.points[i + 1][0] - track.points[i][0];
        let dy = track.points[i + 1][1] - track.points[i][1];
        times.push(track.times[i]);
        values.push((dx * dx + dy * dy).sqrt() / dt);
    }
    Ok(TimeSeries::new(times, values))
}

/// Peak-to-peak range: max - min (0 for empty input)
pub fn range(values: &[f64]) -> f64 {
    match (
        values.iter().cloned().reduce(f64::min),
        values.iter().cloned().reduce(f64::max),
    ) {
        (Some(min), Some(max)) => max - min,
        _ => 0.0,
    }
}

/// Arithmetic mean (0 for empty input)
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean of absolute values (0 for empty input)
pub fn mean_abs(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| v.abs()).sum::<f64>() / values.len() as f64
}

/// Largest absolute value (0 for empty input)
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().map(|v| v.abs()).fold(0.0, f64::max)
}

/// Population variance (0 for fewer than 2 samples)
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Count of strict local maxima: value[i-1] < value[i] > value[i+1]
pub fn local_maxima_count(values: &[f64]) -> usize {
    if values.len() < 3 {
        return 0;
    }
    values
        .windows(3)
        .filter(|w| w[0] < w[1] && w[1] > w[2])
        .count()
}

/// Count of sign changes between consecutive samples
///
/// Zero is its own sign, so a pass through an exact zero counts as two
/// changes (matching `diff(sign(v))` semantics).
pub fn sign_change_count(values: &[f64]) -> usize {
    fn sign(v: f64) -> i8 {
        if v > 0.0 {
            1
        } else if v < 0.0 {
            -1
        } else {
            0
        }
    }
    values
        .windows(2)
        .filter(|w| sign(w[0]) != sign(w[1]))
        .count()
}

/// First index where a magnitude series exceeds `fraction` of its peak
///
/// A series that never exceeds the threshold (e.g. all zeros) is an
/// explicit `NoActivation` failure, not an out-of-range lookup.
pub fn onset_index(values: &[f64], fraction: f64) -> Result<usize, AnalysisError> {
    let peak = values.iter().cloned().fold(0.0, f64::max);
    let threshold = peak * fraction;
    values
        .iter()
        .position(|&v| v > threshold)
        .ok_or(AnalysisError::NoActivation)
}
