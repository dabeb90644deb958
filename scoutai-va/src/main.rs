//! scoutai-va - Video Assessment Microservice
//!
//! Downloads athlete drill clips, extracts 2D pose landmarks via the
//! landmarker sidecar, derives kinematic performance scores per station
//! (goalkeeping, power, speed), and persists aggregated assessments.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use scoutai_va::config::VaConfig;
use scoutai_va::extract::PoseLandmarker;
use scoutai_va::services::VideoDownloader;
use scoutai_va::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting scoutai-va (Video Assessment) microservice");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Resolve configuration and prepare the root folder
    let config = VaConfig::resolve();
    scoutai_common::config::ensure_root_folder(&config.root_folder)
        .map_err(|e| anyhow::anyhow!("Failed to initialize root folder: {}", e))?;

    let db_path = config.database_path();
    info!("Database: {}", db_path.display());

    let db_pool = scoutai_va::db::init_database_pool(&db_path).await?;
    info!("Database connection established");

    // The pose landmarker is constructed once here and injected; a missing
    // sidecar fails startup instead of the first request
    let extractor = PoseLandmarker::new(&config.landmarker_binary, config.landmarker_model.clone())
        .map_err(|e| anyhow::anyhow!("Pose landmarker unavailable: {}", e))?;
    info!(
        binary = %config.landmarker_binary,
        model = %config.landmarker_model.display(),
        "Pose landmarker ready"
    );

    let downloader = VideoDownloader::new(config.temp_dir());
    let state = AppState::new(db_pool, Arc::new(extractor), downloader);
    let app = scoutai_va::build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Listening on http://{}", config.bind_address);
    info!("Health check: http://{}/health", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
