//! scoutai-va library interface
//!
//! Exposes the kinematic analysis pipeline and HTTP surface for
//! integration testing.

pub mod analysis;
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::extract::LandmarkExtractor;
use crate::services::VideoDownloader;

/// Application state shared across handlers
///
/// The landmark extractor is constructed once at startup from configuration
/// and injected here; handlers never reach for ambient global state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Pose landmark extraction seam
    pub extractor: Arc<dyn LandmarkExtractor>,
    /// Clip downloader with shared HTTP client
    pub downloader: VideoDownloader,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        extractor: Arc<dyn LandmarkExtractor>,
        downloader: VideoDownloader,
    ) -> Self {
        Self {
            db,
            extractor,
            downloader,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::analyze_routes())
        .merge(api::assessment_routes())
        // The original frontend is served from another origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
