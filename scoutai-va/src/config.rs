//! Configuration resolution for scoutai-va
//!
//! Every setting resolves ENV → TOML → compiled default. The root folder
//! (database, temp clips, default model location) comes from
//! `scoutai_common::config`.

use std::path::PathBuf;

use scoutai_common::config::{self, TomlConfig};

/// Default HTTP bind address
const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Default landmarker sidecar binary name (resolved via PATH)
const DEFAULT_LANDMARKER: &str = "pose-landmarker";

/// Resolved service settings
#[derive(Debug, Clone)]
pub struct VaConfig {
    pub root_folder: PathBuf,
    pub bind_address: String,
    pub landmarker_binary: String,
    pub landmarker_model: PathBuf,
}

impl VaConfig {
    /// Resolve settings from environment, TOML config and defaults
    pub fn resolve() -> Self {
        let root_folder = config::resolve_root_folder("SCOUTAI_ROOT");
        let toml = config::load_toml_config().unwrap_or_default();
        Self::from_parts(root_folder, toml)
    }

    fn from_parts(root_folder: PathBuf, toml: TomlConfig) -> Self {
        let bind_address = std::env::var("SCOUTAI_VA_BIND")
            .ok()
            .or(toml.bind_address)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        let landmarker_binary = std::env::var("SCOUTAI_LANDMARKER")
            .ok()
            .or(toml.landmarker_binary)
            .unwrap_or_else(|| DEFAULT_LANDMARKER.to_string());

        let landmarker_model = std::env::var("SCOUTAI_POSE_MODEL")
            .ok()
            .or(toml.landmarker_model)
            .map(PathBuf::from)
            .unwrap_or_else(|| root_folder.join("models").join("pose_landmarker_full.task"));

        Self {
            root_folder,
            bind_address,
            landmarker_binary,
            landmarker_model,
        }
    }

    /// SQLite database file inside the root folder
    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join("scoutai.db")
    }

    /// Scratch directory for downloaded clips
    pub fn temp_dir(&self) -> PathBuf {
        self.root_folder.join("temp_clips")
    }
}
