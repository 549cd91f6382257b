//! Backend collaborator traits

use std::path::Path;

use async_trait::async_trait;

use super::error::BackendResult;
use crate::types::{ExportResult, ImportResult, SyncOutcome};

/// Persistence side of import/export
///
/// Implementations:
/// - `FileConfigBackend`: JSON document on disk with safety backups
/// - `MockBackend`: Deterministic responses for tests
#[async_trait]
pub trait ConfigBackend: Send + Sync {
    /// Replace the persisted configuration with the backup at `path`
    ///
    /// Takes a safety backup of the previous configuration first and reports
    /// its id. Returns `Err` only when the call itself fails; an unusable
    /// backup file is `Ok` with `success: false`.
    async fn import_config_from_file(&self, path: &Path) -> BackendResult<ImportResult>;

    /// Write the persisted configuration to `path`
    async fn export_config_to_file(&self, path: &Path) -> BackendResult<ExportResult>;
}

/// Best-effort reconciliation of live, already-active provider state
///
/// Never fails with an error value; the cause is carried in the outcome.
#[async_trait]
pub trait LiveSync: Send + Sync {
    async fn sync_current_providers_live(&self) -> SyncOutcome;
}
