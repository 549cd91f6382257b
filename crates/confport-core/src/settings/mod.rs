//! Transfer settings (YAML)
//!
//! User-level settings live at `<config_dir>/confport/settings.yaml`. Every
//! field is optional; a missing file yields defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Settings for the import/export flows and the file backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TransferSettings {
    /// File name prefix for exports (`<prefix>-YYYYMMDD_HHMMSS.<ext>`)
    pub export_prefix: String,
    /// File extension for exports, without the dot
    pub export_extension: String,
    /// Persisted configuration document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
    /// Directory for safety backups taken before each import
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,
    /// Live settings file rewritten by live sync
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_path: Option<PathBuf>,
    /// Safety backups to keep (0 keeps all)
    pub max_backups: usize,
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self {
            export_prefix: "confport-config".to_string(),
            export_extension: "json".to_string(),
            store_path: None,
            backup_dir: None,
            live_path: None,
            max_backups: Self::DEFAULT_MAX_BACKUPS,
        }
    }
}

impl TransferSettings {
    pub const DEFAULT_MAX_BACKUPS: usize = 10;

    /// `<config_dir>/confport`
    pub fn data_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"))
            .join("confport")
    }

    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("config.json"))
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.backup_dir
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("backups"))
    }

    pub fn live_path(&self) -> PathBuf {
        self.live_path
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("live").join("settings.json"))
    }
}

/// YAML file holding `TransferSettings`
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// User-level settings (`<config_dir>/confport/settings.yaml`)
    pub fn user() -> Self {
        Self::new(TransferSettings::data_dir().join("settings.yaml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> SettingsResult<TransferSettings> {
        if !self.path.exists() {
            return Ok(TransferSettings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(TransferSettings::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save(&self, settings: &TransferSettings) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(settings)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
