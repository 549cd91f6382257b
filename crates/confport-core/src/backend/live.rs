//! File-based live sync
//!
//! Writes the current provider's settings to the file the running tool
//! reads, so an import takes effect without re-selecting the provider.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use super::file::{write_atomic, FileConfigBackend};
use super::traits::LiveSync;
use crate::logging::Logger;
use crate::types::SyncOutcome;

pub struct FileLiveSync {
    backend: Arc<FileConfigBackend>,
    live_path: PathBuf,
    logger: Arc<dyn Logger>,
}

impl FileLiveSync {
    pub fn new(
        backend: Arc<FileConfigBackend>,
        live_path: impl Into<PathBuf>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            backend,
            live_path: live_path.into(),
            logger,
        }
    }

    pub fn live_path(&self) -> &Path {
        &self.live_path
    }
}

impl std::fmt::Debug for FileLiveSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileLiveSync")
            .field("store_path", &self.backend.store_path())
            .field("live_path", &self.live_path)
            .finish()
    }
}

#[async_trait]
impl LiveSync for FileLiveSync {
    async fn sync_current_providers_live(&self) -> SyncOutcome {
        let document = match self.backend.load() {
            Ok(document) => document,
            Err(e) => return SyncOutcome::failed(format!("Failed to read configuration: {}", e)),
        };

        let Some(current) = document.current.as_deref() else {
            self.logger.debug("No current provider; live settings left untouched");
            return SyncOutcome::ok();
        };

        let Some(provider) = document.find_provider(current) else {
            return SyncOutcome::failed(format!("Current provider not found: {}", current));
        };

        let payload = match serde_json::to_string_pretty(&provider.live_settings()) {
            Ok(payload) => payload,
            Err(e) => return SyncOutcome::failed(format!("Failed to serialize live settings: {}", e)),
        };

        match write_atomic(&self.live_path, payload.as_bytes()) {
            Ok(()) => {
                self.logger.info(&format!(
                    "Synced provider '{}' to {}",
                    provider.name,
                    self.live_path.display()
                ));
                SyncOutcome::ok()
            }
            Err(e) => SyncOutcome::failed(format!(
                "Failed to write {}: {}",
                self.live_path.display(),
                e
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::types::{ConfigDocument, ProviderConfig};
    use std::fs;
    use tempfile::tempdir;

    fn setup(dir: &Path) -> (Arc<FileConfigBackend>, FileLiveSync) {
        let logger: Arc<dyn Logger> = Arc::new(NoOpLogger::new());
        let backend = Arc::new(FileConfigBackend::new(
            dir.join("config.json"),
            dir.join("backups"),
            logger.clone(),
        ));
        let sync = FileLiveSync::new(backend.clone(), dir.join("live").join("settings.json"), logger);
        (backend, sync)
    }

    #[tokio::test]
    async fn test_writes_current_provider_settings() {
        let dir = tempdir().unwrap();
        let (backend, sync) = setup(dir.path());
        backend
            .save(
                &ConfigDocument::with_providers(vec![ProviderConfig::new("anthropic")
                    .with_settings(serde_json::json!({ "env": { "ANTHROPIC_AUTH_TOKEN": "sk-x" } }))])
                .with_current("anthropic"),
            )
            .unwrap();

        let outcome = sync.sync_current_providers_live().await;
        assert_eq!(outcome, SyncOutcome::ok());

        let live: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(sync.live_path()).unwrap()).unwrap();
        assert_eq!(live["env"]["ANTHROPIC_AUTH_TOKEN"], "sk-x");
    }

    #[tokio::test]
    async fn test_no_current_provider_is_ok() {
        let dir = tempdir().unwrap();
        let (_backend, sync) = setup(dir.path());

        assert!(sync.sync_current_providers_live().await.ok);
        assert!(!sync.live_path().exists());
    }

    #[tokio::test]
    async fn test_missing_current_provider_fails() {
        let dir = tempdir().unwrap();
        let (backend, sync) = setup(dir.path());
        // Bypass validation to simulate a store edited by hand
        let mut document = ConfigDocument::with_providers(vec![ProviderConfig::new("openai")]);
        document.current = Some("gemini".to_string());
        backend.save(&document).unwrap();

        let outcome = sync.sync_current_providers_live().await;
        assert!(!outcome.ok);
        assert_eq!(outcome.error.as_deref(), Some("Current provider not found: gemini"));
    }

    #[tokio::test]
    async fn test_unreadable_store_fails_without_error() {
        let dir = tempdir().unwrap();
        let (backend, sync) = setup(dir.path());
        fs::write(backend.store_path(), "garbage").unwrap();

        let outcome = sync.sync_current_providers_live().await;
        assert!(!outcome.ok);
        assert!(outcome.error.unwrap().starts_with("Failed to read configuration"));
    }
}
