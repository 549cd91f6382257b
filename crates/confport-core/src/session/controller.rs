//! Import/export controller
//!
//! Drives the import state machine and the export flow. Outcomes are never
//! returned to the caller; they land in the session (`snapshot`/`subscribe`)
//! and in notices sent through the `Notifier`.
//!
//! An import runs in two phases:
//! 1. persist: the backend applies the backup, then dependent views are told
//!    the data changed, whatever happens next
//! 2. reconcile: live provider state is synced on a best-effort basis; a
//!    failure here resolves to `partial-success`, never to `error`

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use super::messages;
use super::naming::ExportNaming;
use super::state::ImportSession;
use crate::backend::{ConfigBackend, LiveSync};
use crate::dialog::FileDialog;
use crate::logging::Logger;
use crate::notify::Notifier;
use crate::types::Notice;

/// Collaborators of the controller
#[derive(Clone)]
pub struct ControllerDeps {
    pub dialog: Arc<dyn FileDialog>,
    pub backend: Arc<dyn ConfigBackend>,
    pub live_sync: Arc<dyn LiveSync>,
    pub notifier: Arc<dyn Notifier>,
    pub logger: Arc<dyn Logger>,
}

/// Owner of one import session and the entry point for import/export
pub struct ImportExportController {
    deps: ControllerDeps,
    naming: ExportNaming,
    state: watch::Sender<ImportSession>,
    /// Single-slot lock backing `is_importing`; contenders are dropped, not queued
    import_slot: Mutex<()>,
    disposed: AtomicBool,
}

impl ImportExportController {
    pub fn new(deps: ControllerDeps) -> Self {
        let (state, _) = watch::channel(ImportSession::new());
        Self {
            deps,
            naming: ExportNaming::default(),
            state,
            import_slot: Mutex::new(()),
            disposed: AtomicBool::new(false),
        }
    }

    pub fn with_export_naming(mut self, naming: ExportNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Current session state
    pub fn snapshot(&self) -> ImportSession {
        self.state.borrow().clone()
    }

    /// Receive every session change from now on
    pub fn subscribe(&self) -> watch::Receiver<ImportSession> {
        self.state.subscribe()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Reset the session and stop publishing changes
    ///
    /// An import still in flight runs to completion; its writes are dropped.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.state.send_modify(|s| *s = ImportSession::new());
        self.deps.logger.debug("Import session disposed");
    }

    /// Ask the file picker for an import source
    ///
    /// A picked path replaces the selection and starts a fresh attempt;
    /// cancelling changes nothing; a picker failure is reported without
    /// touching the session.
    pub async fn select_import_file(&self) -> Option<PathBuf> {
        match self.deps.dialog.open_file().await {
            Ok(Some(path)) => {
                self.select_file(&path);
                Some(path)
            }
            Ok(None) => {
                self.deps.logger.debug("Import file selection cancelled");
                None
            }
            Err(e) => {
                self.deps.logger.error(&format!("{}: {}", messages::SELECT_FILE_FAILED, e));
                self.notice(Notice::error(format!("{}: {}", messages::SELECT_FILE_FAILED, e)));
                None
            }
        }
    }

    /// Select an import source obtained without the picker (drag and drop, command line)
    pub fn select_file(&self, path: &Path) {
        let path = path.display().to_string();
        self.deps.logger.debug(&format!("Selected import file {}", path));
        self.update(|s| s.select_file(path));
    }

    /// Drop the selection and every outcome field
    pub fn clear_selection(&self) {
        self.update(ImportSession::clear);
    }

    /// Back to `idle`, keeping the selected file
    pub fn reset_status(&self) {
        self.update(ImportSession::reset_status);
    }

    /// Import the selected file
    ///
    /// Without a selection this only reports the problem. While another
    /// import is in flight the call is dropped silently.
    pub async fn import_config(&self) {
        let selected = self.state.borrow().selected_file().to_string();
        if selected.is_empty() {
            self.notice(Notice::error(messages::NO_FILE_SELECTED));
            return;
        }

        let Ok(_slot) = self.import_slot.try_lock() else {
            self.deps.logger.debug("Import already in progress; request dropped");
            return;
        };
        let mut attempt = 0;
        self.update(|s| attempt = s.begin_import());
        let _in_flight = InFlight { controller: self, attempt };
        self.deps.logger.info(&format!("Importing configuration from {}", selected));

        // Phase 1: persist, then refresh dependent views
        let backup_id = match self.persist(Path::new(&selected)).await {
            Ok(backup_id) => backup_id,
            Err(message) => {
                self.resolve(|s| s.fail(attempt, message.clone()));
                self.notice(Notice::error(message));
                return;
            }
        };
        self.resolve(|s| s.record_persisted(attempt, backup_id.clone()));

        if let Err(e) = self.deps.notifier.import_succeeded().await {
            self.deps.logger.warn(&format!("Data-changed notification failed: {}", e));
        }

        // Phase 2: best-effort live reconciliation
        let outcome = self.deps.live_sync.sync_current_providers_live().await;
        if outcome.ok {
            self.resolve(|s| s.finish(attempt, true));
            self.deps.logger.info(&format!(
                "Import complete (backup {})",
                backup_id.as_deref().unwrap_or("none")
            ));
            self.notice(Notice::success(messages::IMPORT_SUCCEEDED));
        } else {
            self.deps.logger.warn(&format!(
                "Live sync after import failed: {}",
                outcome.error.as_deref().unwrap_or("unknown error")
            ));
            self.resolve(|s| s.finish(attempt, false));
            self.notice(Notice::warning(messages::PARTIAL_SUCCESS));
        }
    }

    /// Export the persisted configuration to a destination chosen by the user
    ///
    /// Every outcome is reported as exactly one notice.
    pub async fn export_config(&self) {
        let file_name = self.naming.file_name(chrono::Local::now().naive_local());

        let destination = match self.deps.dialog.save_file(&file_name).await {
            Ok(Some(path)) => path,
            Ok(None) => {
                self.notice(Notice::error(messages::EXPORT_NO_DESTINATION));
                return;
            }
            Err(e) => {
                self.deps.logger.error(&format!("{}: {}", messages::EXPORT_DIALOG_FAILED, e));
                self.notice(Notice::error(format!("{}: {}", messages::EXPORT_DIALOG_FAILED, e)));
                return;
            }
        };

        match self.deps.backend.export_config_to_file(&destination).await {
            Ok(result) if result.success => {
                let file_path = result
                    .file_path
                    .unwrap_or_else(|| destination.display().to_string());
                self.deps.logger.info(&format!("Exported configuration to {}", file_path));
                self.notice(Notice::success(format!("Configuration exported to {}", file_path)));
            }
            Ok(result) => {
                let message = non_empty(result.message).unwrap_or_else(|| messages::EXPORT_FAILED.to_string());
                self.deps.logger.warn(&format!("Export rejected: {}", message));
                self.notice(Notice::error(message));
            }
            Err(e) => {
                let message = non_empty(Some(e.to_string())).unwrap_or_else(|| messages::EXPORT_FAILED.to_string());
                self.deps.logger.error(&format!("Export failed: {}", message));
                self.notice(Notice::error(message));
            }
        }
    }

    /// Run the backend import; `Err` carries the user-facing message
    async fn persist(&self, path: &Path) -> Result<Option<String>, String> {
        match self.deps.backend.import_config_from_file(path).await {
            Ok(result) if result.success => Ok(result.backup_id),
            Ok(result) => {
                let message = non_empty(result.message).unwrap_or_else(|| messages::IMPORT_CORRUPTED.to_string());
                self.deps.logger.warn(&format!("Import rejected: {}", message));
                Err(message)
            }
            Err(e) => {
                let message = non_empty(Some(e.to_string())).unwrap_or_else(|| messages::IMPORT_FAILED.to_string());
                self.deps.logger.error(&format!("Import failed: {}", message));
                Err(message)
            }
        }
    }

    fn update(&self, apply: impl FnOnce(&mut ImportSession)) {
        if self.is_disposed() {
            self.deps.logger.debug("Session disposed; state update dropped");
            return;
        }
        self.state.send_modify(apply);
    }

    /// Apply an outcome of the running import; overtaken outcomes are logged only
    fn resolve(&self, apply: impl FnOnce(&mut ImportSession) -> bool) {
        let mut recorded = true;
        self.update(|s| recorded = apply(s));
        if !recorded {
            self.deps
                .logger
                .debug("Selection changed during import; outcome not recorded");
        }
    }

    fn notice(&self, notice: Notice) {
        if self.is_disposed() {
            self.deps.logger.debug(&format!("Session disposed; notice dropped: {}", notice));
            return;
        }
        self.deps.notifier.notify(notice);
    }
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.trim().is_empty())
}

/// Releases `is_importing` if an import stops without resolving
/// (its future dropped, or a collaborator panicked)
struct InFlight<'a> {
    controller: &'a ImportExportController,
    attempt: u64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let still_importing = self.controller.state.borrow().is_importing();
        if still_importing {
            self.controller
                .deps
                .logger
                .warn("Import stopped before resolving; releasing guard");
            self.controller
                .update(|s| s.abandon_import(self.attempt, messages::IMPORT_INTERRUPTED));
        }
    }
}

/// Disposes the controller when dropped
///
/// Hosts hold one per mounted view so the session cannot outlive it.
pub struct SessionScope {
    controller: Arc<ImportExportController>,
}

impl SessionScope {
    pub fn new(controller: Arc<ImportExportController>) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &Arc<ImportExportController> {
        &self.controller
    }
}

impl std::ops::Deref for SessionScope {
    type Target = ImportExportController;

    fn deref(&self) -> &Self::Target {
        &self.controller
    }
}

impl Drop for SessionScope {
    fn drop(&mut self) {
        self.controller.dispose();
    }
}
