//! Analysis API handlers
//!
//! `POST /analyze` scores one clip for one station. `POST /assess` runs all
//! three stations concurrently and aggregates them into a persisted
//! assessment. Station failures are isolated: one bad clip becomes a
//! structured error payload for that station and never blocks the others.

use std::collections::BTreeMap;

use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, warn};

use crate::analysis::{self, Station};
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    AnalyzeRequest, AnalyzeResponse, AssessRequest, AssessResponse, StationOutcome,
};
use crate::AppState;

/// POST /analyze
///
/// Score a single station clip. The station name is validated before any
/// network or disk work happens.
pub async fn analyze_station(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let station = Station::parse(&request.station)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid station: {}", request.station)))?;

    info!(
        athlete = %request.athlete,
        station = station.as_str(),
        "Analyze request"
    );

    let analysis = run_station(&state, station, &request.video_url).await?;

    Ok(Json(AnalyzeResponse {
        athlete: request.athlete,
        station: station.as_str().to_string(),
        analysis,
    }))
}

/// POST /assess
///
/// Run all three stations concurrently and aggregate. The assessment is
/// built and persisted only when every station scored; failed stations are
/// reported per-station with no placeholder fabricated.
pub async fn assess(
    State(state): State<AppState>,
    Json(request): Json<AssessRequest>,
) -> ApiResult<Json<AssessResponse>> {
    info!(athlete = %request.athlete, "Assessment request");

    let (goalkeeping, power, speed) = tokio::join!(
        station_outcome(&state, Station::Goalkeeping, &request.clips.goalkeeping),
        station_outcome(&state, Station::Power, &request.clips.power),
        station_outcome(&state, Station::Speed, &request.clips.speed),
    );

    let assessment = match (goalkeeping.result(), power.result(), speed.result()) {
        (Some(gk), Some(pw), Some(sp)) => {
            let assessment = analysis::aggregate::build_assessment(
                &request.athlete,
                gk.clone(),
                pw.clone(),
                sp.clone(),
            );
            db::assessments::insert_assessment(&state.db, &assessment).await?;
            info!(
                athlete = %request.athlete,
                assessment_id = %assessment.assessment_id,
                overall_score = assessment.overall_score,
                tier = assessment.tier.as_str(),
                "Assessment persisted"
            );
            Some(assessment)
        }
        _ => {
            warn!(athlete = %request.athlete, "Assessment incomplete, not persisted");
            None
        }
    };

    let stations = BTreeMap::from([
        (Station::Goalkeeping.as_str().to_string(), goalkeeping),
        (Station::Power.as_str().to_string(), power),
        (Station::Speed.as_str().to_string(), speed),
    ]);

    Ok(Json(AssessResponse {
        athlete: request.athlete,
        stations,
        assessment,
    }))
}

/// Download, extract and score one station clip
///
/// Analysis failures come back as `StationOutcome::Failed`; download and
/// extraction failures propagate as `ApiError` for the single-station
/// endpoint to map to HTTP status semantics.
async fn run_station(
    state: &AppState,
    station: Station,
    video_url: &str,
) -> ApiResult<StationOutcome> {
    let clip_file = state.downloader.fetch(video_url).await?;
    let extractor = state.extractor.clone();

    // Extraction and scoring are CPU/subprocess work; keep them off the
    // async runtime. The temp clip moves into the task so the file outlives
    // the extraction and is removed when the task finishes, success or not.
    let analysis = tokio::task::spawn_blocking(move || {
        let clip = extractor.extract(clip_file.path())?;
        Ok::<_, ApiError>(analysis::analyze_clip(station, &clip))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Analysis task failed: {}", e)))??;

    match analysis {
        Ok(result) => Ok(StationOutcome::Scored(result)),
        Err(err) => {
            warn!(station = station.as_str(), error = %err, "Station analysis failed");
            Ok(StationOutcome::Failed {
                error: err.to_string(),
            })
        }
    }
}

/// One station of a full assessment: every failure kind becomes a
/// per-station error payload so the other stations proceed
async fn station_outcome(state: &AppState, station: Station, video_url: &str) -> StationOutcome {
    match run_station(state, station, video_url).await {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(station = station.as_str(), error = %err, "Station unavailable");
            StationOutcome::Failed {
                error: err.to_string(),
            }
        }
    }
}

/// Build analysis routes
pub fn analyze_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze_station))
        .route("/assess", post(assess))
}
