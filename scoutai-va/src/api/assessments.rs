//! Assessment retrieval API handlers

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::Assessment;
use crate::AppState;

/// Default page size for assessment listings
const DEFAULT_LIMIT: i64 = 50;

/// GET /assessments query parameters
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub athlete: Option<String>,
    pub limit: Option<i64>,
}

/// GET /assessments/:id
pub async fn get_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Assessment>> {
    db::assessments::get_assessment(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Assessment not found: {}", id)))
}

/// GET /assessments?athlete=&limit=
pub async fn list_assessments(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Assessment>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 500);
    let assessments =
        db::assessments::list_assessments(&state.db, params.athlete.as_deref(), limit).await?;
    Ok(Json(assessments))
}

/// Build assessment retrieval routes
pub fn assessment_routes() -> Router<AppState> {
    Router::new()
        .route("/assessments", get(list_assessments))
        .route("/assessments/:id", get(get_assessment))
}
