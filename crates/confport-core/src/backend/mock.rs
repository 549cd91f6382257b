//! Mock backend and live sync for testing
//!
//! Deterministic, configurable responses without touching the filesystem.
//! A shared `CallLog` records the order in which collaborators were hit.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{BackendError, BackendResult};
use super::traits::{ConfigBackend, LiveSync};
use crate::types::{ExportResult, ImportResult, SyncOutcome};

/// Ordered record of collaborator calls, shared between mocks
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

/// How the mock answers `import_config_from_file`
#[derive(Debug, Clone)]
pub enum MockImportMode {
    /// Import succeeds and reports this backup id
    Succeed { backup_id: Option<String> },
    /// Backend answers `success: false`
    Reject { message: Option<String> },
    /// The call itself fails
    Fail(String),
}

/// How the mock answers `export_config_to_file`
#[derive(Debug, Clone)]
pub enum MockExportMode {
    /// Export succeeds, reporting the requested path
    Succeed,
    Reject(String),
    Fail(String),
}

/// Mock configuration backend
pub struct MockBackend {
    import_mode: MockImportMode,
    export_mode: MockExportMode,
    delay_ms: u64,
    import_calls: AtomicUsize,
    export_calls: AtomicUsize,
    paths: Mutex<Vec<PathBuf>>,
    log: CallLog,
}

impl MockBackend {
    pub fn with_mode(import_mode: MockImportMode) -> Self {
        Self {
            import_mode,
            export_mode: MockExportMode::Succeed,
            delay_ms: 0,
            import_calls: AtomicUsize::new(0),
            export_calls: AtomicUsize::new(0),
            paths: Mutex::new(Vec::new()),
            log: CallLog::new(),
        }
    }

    /// Backend whose imports succeed with `backup_id`
    pub fn importing(backup_id: impl Into<String>) -> Self {
        Self::with_mode(MockImportMode::Succeed { backup_id: Some(backup_id.into()) })
    }

    /// Backend that answers every import with `success: false`
    pub fn rejecting(message: Option<&str>) -> Self {
        Self::with_mode(MockImportMode::Reject { message: message.map(str::to_string) })
    }

    /// Backend whose import call fails outright
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_mode(MockImportMode::Fail(message.into()))
    }

    pub fn with_export(mut self, mode: MockExportMode) -> Self {
        self.export_mode = mode;
        self
    }

    /// Delay every call, keeping imports in flight long enough to race them
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    pub fn import_calls(&self) -> usize {
        self.import_calls.load(Ordering::SeqCst)
    }

    pub fn export_calls(&self) -> usize {
        self.export_calls.load(Ordering::SeqCst)
    }

    /// Every path passed to import or export, in call order
    pub fn paths(&self) -> Vec<PathBuf> {
        self.paths.lock().clone()
    }

    async fn pause(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

#[async_trait]
impl ConfigBackend for MockBackend {
    async fn import_config_from_file(&self, path: &Path) -> BackendResult<ImportResult> {
        self.import_calls.fetch_add(1, Ordering::SeqCst);
        self.paths.lock().push(path.to_path_buf());
        self.log.record("import");
        self.pause().await;

        match &self.import_mode {
            MockImportMode::Succeed { backup_id } => Ok(ImportResult::succeeded(backup_id.clone())),
            MockImportMode::Reject { message: Some(message) } => Ok(ImportResult::failure(message.clone())),
            MockImportMode::Reject { message: None } => Ok(ImportResult::failure_without_message()),
            MockImportMode::Fail(message) => Err(BackendError::Other(message.clone())),
        }
    }

    async fn export_config_to_file(&self, path: &Path) -> BackendResult<ExportResult> {
        self.export_calls.fetch_add(1, Ordering::SeqCst);
        self.paths.lock().push(path.to_path_buf());
        self.log.record("export");
        self.pause().await;

        match &self.export_mode {
            MockExportMode::Succeed => Ok(ExportResult::succeeded(path.display().to_string())),
            MockExportMode::Reject(message) => Ok(ExportResult::failure(message.clone())),
            MockExportMode::Fail(message) => Err(BackendError::Other(message.clone())),
        }
    }
}

/// Mock live sync returning a fixed outcome
pub struct MockLiveSync {
    outcome: SyncOutcome,
    calls: AtomicUsize,
    log: CallLog,
}

impl MockLiveSync {
    pub fn ok() -> Self {
        Self::with_outcome(SyncOutcome::ok())
    }

    pub fn failing(error: impl Into<String>) -> Self {
        Self::with_outcome(SyncOutcome::failed(error))
    }

    pub fn with_outcome(outcome: SyncOutcome) -> Self {
        Self { outcome, calls: AtomicUsize::new(0), log: CallLog::new() }
    }

    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LiveSync for MockLiveSync {
    async fn sync_current_providers_live(&self) -> SyncOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.record("sync");
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_import_modes() {
        let ok = MockBackend::importing("b1");
        let result = ok.import_config_from_file(Path::new("/tmp/a.json")).await.unwrap();
        assert_eq!(result.backup_id.as_deref(), Some("b1"));
        assert_eq!(ok.import_calls(), 1);
        assert_eq!(ok.paths(), vec![PathBuf::from("/tmp/a.json")]);

        let rejected = MockBackend::rejecting(Some("bad format"));
        let result = rejected.import_config_from_file(Path::new("x")).await.unwrap();
        assert_eq!(result, ImportResult::failure("bad format"));

        let failing = MockBackend::failing("disk full");
        let err = failing.import_config_from_file(Path::new("x")).await.unwrap_err();
        assert_eq!(err.to_string(), "disk full");
    }

    #[tokio::test]
    async fn test_export_modes() {
        let backend = MockBackend::importing("b1").with_export(MockExportMode::Reject("locked".into()));
        let result = backend.export_config_to_file(Path::new("/tmp/out.json")).await.unwrap();
        assert_eq!(result, ExportResult::failure("locked"));
        assert_eq!(backend.export_calls(), 1);
        assert_eq!(backend.import_calls(), 0);
    }

    #[tokio::test]
    async fn test_call_log_is_shared() {
        let log = CallLog::new();
        let backend = MockBackend::importing("b1").with_call_log(log.clone());
        let sync = MockLiveSync::failing("x").with_call_log(log.clone());

        backend.import_config_from_file(Path::new("x")).await.unwrap();
        let outcome = sync.sync_current_providers_live().await;

        assert!(!outcome.ok);
        assert_eq!(sync.calls(), 1);
        assert_eq!(log.calls(), vec!["import", "sync"]);
    }
}
