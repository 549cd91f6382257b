//! File-based configuration backend
//!
//! The configuration lives in one JSON document (`store_path`). Every import
//! first copies the current document into `backup_dir` as
//! `backup_YYYYMMDD_HHMMSS.json`; the file stem is the backup id reported to
//! the caller. Writes go through a sibling temp file and a rename so a
//! failed write never leaves a truncated store behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{BackendError, BackendResult};
use super::traits::ConfigBackend;
use crate::logging::Logger;
use crate::settings::TransferSettings;
use crate::types::{ConfigDocument, ExportResult, ImportResult};

const BACKUP_PREFIX: &str = "backup_";
const BACKUP_EXTENSION: &str = "json";

/// A safety backup on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    pub id: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// File-based configuration backend
pub struct FileConfigBackend {
    store_path: PathBuf,
    backup_dir: PathBuf,
    max_backups: usize,
    logger: Arc<dyn Logger>,
    write_lock: Mutex<()>,
}

impl FileConfigBackend {
    pub fn new(
        store_path: impl Into<PathBuf>,
        backup_dir: impl Into<PathBuf>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            store_path: store_path.into(),
            backup_dir: backup_dir.into(),
            max_backups: TransferSettings::DEFAULT_MAX_BACKUPS,
            logger,
            write_lock: Mutex::new(()),
        }
    }

    /// Build a backend from resolved settings
    pub fn from_settings(settings: &TransferSettings, logger: Arc<dyn Logger>) -> Self {
        Self::new(settings.store_path(), settings.backup_dir(), logger)
            .with_max_backups(settings.max_backups)
    }

    /// Keep at most `max` safety backups (0 keeps everything)
    pub fn with_max_backups(mut self, max: usize) -> Self {
        self.max_backups = max;
        self
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Load the persisted document; a missing store reads as an empty document
    pub fn load(&self) -> BackendResult<ConfigDocument> {
        if !self.store_path.exists() {
            return Ok(ConfigDocument::default());
        }
        let content = fs::read_to_string(&self.store_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Persist `document`, replacing the store atomically
    pub fn save(&self, document: &ConfigDocument) -> BackendResult<()> {
        let _guard = self.write_lock.lock();
        self.write_store(document)
    }

    /// Safety backups, newest first
    pub fn list_backups(&self) -> BackendResult<Vec<BackupEntry>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backup_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            if !id.starts_with(BACKUP_PREFIX) {
                continue;
            }
            let size_bytes = entry.metadata()?.len();
            entries.push(BackupEntry { id, path, size_bytes });
        }

        entries.sort_by(|a, b| backup_sort_key(&b.id).cmp(&backup_sort_key(&a.id)));
        Ok(entries)
    }

    /// Copy a safety backup over the store
    ///
    /// The store being replaced is itself backed up first; the id of that
    /// new backup is returned.
    pub fn restore_backup(&self, backup_id: &str) -> BackendResult<String> {
        if backup_id.is_empty()
            || !backup_id.starts_with(BACKUP_PREFIX)
            || backup_id.contains(|c| c == '/' || c == '\\')
            || backup_id.contains("..")
        {
            return Err(BackendError::InvalidBackupId(backup_id.to_string()));
        }

        let path = self.backup_path(backup_id);
        if !path.exists() {
            return Err(BackendError::BackupNotFound(backup_id.to_string()));
        }

        let content = fs::read_to_string(&path)?;
        let document: ConfigDocument = serde_json::from_str(&content)?;

        let _guard = self.write_lock.lock();
        let new_backup = self.create_safety_backup()?;
        self.write_store(&document)?;
        self.prune_after_write();
        self.logger.info(&format!(
            "Restored backup {} (previous configuration saved as {})",
            backup_id, new_backup
        ));
        Ok(new_backup)
    }

    fn backup_path(&self, backup_id: &str) -> PathBuf {
        self.backup_dir.join(format!("{}.{}", backup_id, BACKUP_EXTENSION))
    }

    fn write_store(&self, document: &ConfigDocument) -> BackendResult<()> {
        let content = serde_json::to_string_pretty(document)?;
        write_atomic(&self.store_path, content.as_bytes())?;
        Ok(())
    }

    /// Snapshot the current store into the backup directory, returning the id
    fn create_safety_backup(&self) -> BackendResult<String> {
        fs::create_dir_all(&self.backup_dir)?;

        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        let mut id = format!("{}{}", BACKUP_PREFIX, stamp);
        let mut counter = 1;
        while self.backup_path(&id).exists() {
            id = format!("{}{}_{}", BACKUP_PREFIX, stamp, counter);
            counter += 1;
        }

        let target = self.backup_path(&id);
        if self.store_path.exists() {
            fs::copy(&self.store_path, &target)?;
        } else {
            let empty = serde_json::to_string_pretty(&ConfigDocument::default())?;
            fs::write(&target, empty)?;
        }

        self.logger.debug(&format!("Safety backup written: {}", target.display()));
        Ok(id)
    }

    fn prune_backups(&self) -> BackendResult<usize> {
        if self.max_backups == 0 {
            return Ok(0);
        }

        let backups = self.list_backups()?;
        let mut removed = 0;
        for stale in backups.iter().skip(self.max_backups) {
            fs::remove_file(&stale.path)?;
            removed += 1;
        }
        Ok(removed)
    }

    /// Validate and apply an imported document under the write lock
    fn apply_import(&self, document: &ConfigDocument) -> BackendResult<String> {
        let _guard = self.write_lock.lock();
        let backup_id = self.create_safety_backup()?;
        self.write_store(document)?;
        self.prune_after_write();
        Ok(backup_id)
    }

    /// Retention failures are logged; the write itself already succeeded
    fn prune_after_write(&self) {
        match self.prune_backups() {
            Ok(0) => {}
            Ok(n) => self.logger.debug(&format!("Pruned {} old backup(s)", n)),
            Err(e) => self.logger.warn(&format!("Failed to prune old backups: {}", e)),
        }
    }
}

impl std::fmt::Debug for FileConfigBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigBackend")
            .field("store_path", &self.store_path)
            .field("backup_dir", &self.backup_dir)
            .field("max_backups", &self.max_backups)
            .finish()
    }
}

#[async_trait]
impl ConfigBackend for FileConfigBackend {
    async fn import_config_from_file(&self, path: &Path) -> BackendResult<ImportResult> {
        self.logger.info(&format!("Importing configuration from {}", path.display()));

        let bytes = fs::read(path)?;
        let document = match parse_document(path, &bytes) {
            Ok(document) => document,
            Err(message) => {
                self.logger.warn(&format!("Rejected {}: {}", path.display(), message));
                return Ok(ImportResult::failure(message));
            }
        };

        if let Err(message) = document.validate() {
            self.logger.warn(&format!("Rejected {}: {}", path.display(), message));
            return Ok(ImportResult::failure(message));
        }

        let backup_id = self.apply_import(&document)?;
        self.logger.info(&format!(
            "Imported {} provider(s); previous configuration saved as {}",
            document.providers.len(),
            backup_id
        ));
        Ok(ImportResult::succeeded(Some(backup_id)))
    }

    async fn export_config_to_file(&self, path: &Path) -> BackendResult<ExportResult> {
        let document = self.load()?;
        let content = serde_json::to_string_pretty(&document)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, content)?;

        self.logger.info(&format!("Exported configuration to {}", path.display()));
        Ok(ExportResult::succeeded(path.display().to_string()))
    }
}

/// Parse a backup file, choosing YAML for `.yaml`/`.yml` and JSON otherwise
fn parse_document(path: &Path, bytes: &[u8]) -> Result<ConfigDocument, String> {
    let content = std::str::from_utf8(bytes)
        .map_err(|_| "Configuration file is not valid UTF-8 text".to_string())?;
    if content.trim().is_empty() {
        return Err("Configuration file is empty".to_string());
    }

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref(),
        Some("yaml") | Some("yml")
    );

    if is_yaml {
        serde_yaml::from_str(content).map_err(|e| format!("Invalid configuration file: {}", e))
    } else {
        serde_json::from_str(content).map_err(|e| format!("Invalid configuration file: {}", e))
    }
}

/// Sort key for backup ids: timestamp text, then collision counter
fn backup_sort_key(id: &str) -> (String, u32) {
    let rest = id.strip_prefix(BACKUP_PREFIX).unwrap_or(id);
    // YYYYMMDD_HHMMSS is 15 characters; anything after is `_N`
    match rest.get(..15) {
        Some(stamp) => {
            let counter = rest[15..].trim_start_matches('_').parse().unwrap_or(0);
            (stamp.to_string(), counter)
        }
        None => (rest.to_string(), 0),
    }
}

/// Write through a sibling temp file and rename over the target
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "config".to_string());
    let tmp = path.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&tmp, bytes)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}
