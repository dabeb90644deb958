//! Configuration loading and root folder resolution
//!
//! Resolution priority for the root folder:
//! 1. Environment variable (highest priority)
//! 2. TOML config file in the platform config directory
//! 3. OS-dependent compiled default (fallback)
//!
//! The root folder holds the SQLite database, the temp-clip scratch
//! directory, and (by default) the pose landmarker model file.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// TOML configuration file contents (`scoutai.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Root folder for service data (database, temp clips, models)
    pub root_folder: Option<String>,

    /// Bind address for the HTTP server (e.g. "127.0.0.1:8000")
    pub bind_address: Option<String>,

    /// Pose landmarker sidecar binary name or path
    pub landmarker_binary: Option<String>,

    /// Pose landmarker model file path
    pub landmarker_model: Option<String>,
}

/// Resolve the service root folder
///
/// Priority: `env_var_name` → TOML `root_folder` → platform default.
pub fn resolve_root_folder(env_var_name: &str) -> PathBuf {
    // Priority 1: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        tracing::info!("Root folder from {}: {}", env_var_name, path);
        return PathBuf::from(path);
    }

    // Priority 2: TOML config file
    if let Ok(config) = load_toml_config() {
        if let Some(root_folder) = config.root_folder {
            tracing::info!("Root folder from TOML config: {}", root_folder);
            return PathBuf::from(root_folder);
        }
    }

    // Priority 3: OS-dependent compiled default
    let default = default_root_folder();
    tracing::info!("Root folder defaulted to {}", default.display());
    default
}

/// Load the TOML config file from the platform config directory
pub fn load_toml_config() -> Result<TomlConfig> {
    let path = config_file_path()?;
    if !path.exists() {
        return Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Read TOML failed: {}", e)))?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
}

/// Platform config file location (`<config dir>/scoutai/scoutai.toml`)
fn config_file_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("scoutai").join("scoutai.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/scoutai (or /var/lib/scoutai for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("scoutai"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/scoutai"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("scoutai"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/scoutai"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("scoutai"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\scoutai"))
    } else {
        PathBuf::from("./scoutai_data")
    }
}

/// Ensure the root folder (and its temp-clip subdirectory) exist
pub fn ensure_root_folder(root: &PathBuf) -> Result<()> {
    std::fs::create_dir_all(root)?;
    std::fs::create_dir_all(root.join("temp_clips"))?;
    Ok(())
}
