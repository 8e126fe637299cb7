use crate::errors::ExportError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::debug;

pub const SETTINGS_FILE_NAME: &str = "config.json";

/// Remembered CLI state. The exporter core never touches this; only the
/// command-line embedding reads and writes it.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub default_path: Option<PathBuf>,
}

impl Settings {
    /// The settings file lives next to the executable, falling back to the
    /// working directory when the executable path is unavailable.
    pub fn default_location() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(SETTINGS_FILE_NAME)
    }

    pub async fn load(path: &Path) -> Result<Self, ExportError> {
        if !path.is_file() {
            debug!("No settings file at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        let raw = async_fs::read_to_string(path)
            .await
            .map_err(|e| ExportError::SettingsError(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| ExportError::SettingsError(e.to_string()))
    }

    pub async fn store(&self, path: &Path) -> Result<(), ExportError> {
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| ExportError::SettingsError(e.to_string()))?;
        async_fs::write(path, raw)
            .await
            .map_err(|e| ExportError::SettingsError(e.to_string()))
    }
}
