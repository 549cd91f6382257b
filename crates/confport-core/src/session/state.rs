//! Import session state
//!
//! Fields are private; only the controller drives transitions, and every
//! transition method keeps the invariants below in a single write:
//! - an error message is present only while the status is `error`
//! - `is_importing` is never true once the status has resolved
//!
//! Each import attempt carries the attempt number returned by
//! `begin_import`. Selecting, clearing or resetting starts a new attempt, so
//! outcomes of an import that was overtaken only release the guard.

use serde::Serialize;

use crate::types::ImportStatus;

/// Selection and status of one import session
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSession {
    selected_file: String,
    status: ImportStatus,
    error_message: Option<String>,
    backup_id: Option<String>,
    is_importing: bool,
    #[serde(skip)]
    attempt: u64,
}

// The attempt counter is bookkeeping; sessions compare by what hosts see
impl PartialEq for ImportSession {
    fn eq(&self, other: &Self) -> bool {
        self.selected_file == other.selected_file
            && self.status == other.status
            && self.error_message == other.error_message
            && self.backup_id == other.backup_id
            && self.is_importing == other.is_importing
    }
}

impl Eq for ImportSession {}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chosen import source; empty when nothing is selected
    pub fn selected_file(&self) -> &str {
        &self.selected_file
    }

    pub fn has_selection(&self) -> bool {
        !self.selected_file.is_empty()
    }

    pub fn status(&self) -> ImportStatus {
        self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Safety backup id reported by the last import that reached the backend
    pub fn backup_id(&self) -> Option<&str> {
        self.backup_id.as_deref()
    }

    pub fn is_importing(&self) -> bool {
        self.is_importing
    }

    /// Whether the session satisfies its invariants
    pub fn is_consistent(&self) -> bool {
        let error_ok = self.error_message.is_none() || self.status == ImportStatus::Error;
        let guard_ok = !(self.is_importing && self.status.is_resolved());
        error_ok && guard_ok
    }

    pub(crate) fn select_file(&mut self, path: String) {
        self.selected_file = path;
        self.reset_status();
    }

    /// Back to initial values; an in-flight import keeps its guard
    pub(crate) fn clear(&mut self) {
        self.selected_file.clear();
        self.reset_status();
    }

    pub(crate) fn reset_status(&mut self) {
        self.attempt += 1;
        self.status = ImportStatus::Idle;
        self.error_message = None;
        self.backup_id = None;
    }

    /// Start an attempt and return its number
    pub(crate) fn begin_import(&mut self) -> u64 {
        self.attempt += 1;
        self.status = ImportStatus::Importing;
        self.error_message = None;
        self.backup_id = None;
        self.is_importing = true;
        self.attempt
    }

    fn is_current(&self, attempt: u64) -> bool {
        self.attempt == attempt
    }

    /// Phase one done: the backend persisted the import
    ///
    /// Returns false when the attempt was overtaken and nothing was recorded.
    pub(crate) fn record_persisted(&mut self, attempt: u64, backup_id: Option<String>) -> bool {
        if !self.is_current(attempt) {
            return false;
        }
        self.backup_id = backup_id;
        true
    }

    /// Phase two done: resolve to `success` or `partial-success`
    pub(crate) fn finish(&mut self, attempt: u64, reconciled: bool) -> bool {
        self.is_importing = false;
        if !self.is_current(attempt) {
            return false;
        }
        self.status = if reconciled {
            ImportStatus::Success
        } else {
            ImportStatus::PartialSuccess
        };
        self.error_message = None;
        true
    }

    pub(crate) fn fail(&mut self, attempt: u64, message: String) -> bool {
        self.is_importing = false;
        if !self.is_current(attempt) {
            return false;
        }
        self.status = ImportStatus::Error;
        self.error_message = Some(message);
        self.backup_id = None;
        true
    }

    /// Release the guard of an import that stopped before resolving
    pub(crate) fn abandon_import(&mut self, attempt: u64, message: &str) {
        if !self.is_importing {
            return;
        }
        self.is_importing = false;
        if self.is_current(attempt) && self.status == ImportStatus::Importing {
            self.status = ImportStatus::Error;
            self.error_message = Some(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_session() {
        let session = ImportSession::new();
        assert_eq!(session.selected_file(), "");
        assert!(!session.has_selection());
        assert_eq!(session.status(), ImportStatus::Idle);
        assert!(session.error_message().is_none());
        assert!(session.backup_id().is_none());
        assert!(!session.is_importing());
        assert!(session.is_consistent());
    }

    #[test]
    fn test_success_path() {
        let mut session = ImportSession::new();
        session.select_file("/tmp/backup.json".to_string());
        let attempt = session.begin_import();
        assert_eq!(session.status(), ImportStatus::Importing);
        assert!(session.is_importing());

        assert!(session.record_persisted(attempt, Some("b1".to_string())));
        // Still in flight until live sync resolves
        assert_eq!(session.status(), ImportStatus::Importing);
        assert_eq!(session.backup_id(), Some("b1"));

        assert!(session.finish(attempt, true));
        assert_eq!(session.status(), ImportStatus::Success);
        assert!(!session.is_importing());
        assert!(session.is_consistent());
    }

    #[test]
    fn test_partial_success_keeps_backup() {
        let mut session = ImportSession::new();
        session.select_file("/tmp/backup.json".to_string());
        let attempt = session.begin_import();
        session.record_persisted(attempt, Some("b2".to_string()));
        session.finish(attempt, false);

        assert_eq!(session.status(), ImportStatus::PartialSuccess);
        assert_eq!(session.backup_id(), Some("b2"));
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_new_attempt_drops_previous_outcome() {
        let mut session = ImportSession::new();
        session.select_file("/tmp/backup.json".to_string());
        let attempt = session.begin_import();
        session.fail(attempt, "bad format".to_string());
        assert_eq!(session.error_message(), Some("bad format"));

        let retry = session.begin_import();
        assert_ne!(retry, attempt);
        assert!(session.error_message().is_none());
        assert!(session.backup_id().is_none());
        assert!(session.is_consistent());
    }

    #[test]
    fn test_select_starts_fresh_attempt() {
        let mut session = ImportSession::new();
        session.select_file("/tmp/a.json".to_string());
        let attempt = session.begin_import();
        session.record_persisted(attempt, Some("b1".to_string()));
        session.finish(attempt, true);

        session.select_file("/tmp/b.json".to_string());
        assert_eq!(session.selected_file(), "/tmp/b.json");
        assert_eq!(session.status(), ImportStatus::Idle);
        assert!(session.backup_id().is_none());
        assert!(!session.is_importing());
    }

    #[test]
    fn test_clear_and_reset() {
        let mut session = ImportSession::new();
        session.select_file("/tmp/a.json".to_string());
        let attempt = session.begin_import();
        session.fail(attempt, "disk full".to_string());

        let mut reset = session.clone();
        reset.reset_status();
        assert_eq!(reset.selected_file(), "/tmp/a.json");
        assert_eq!(reset.status(), ImportStatus::Idle);
        assert!(reset.error_message().is_none());

        session.clear();
        assert_eq!(session, ImportSession::new());
    }

    #[test]
    fn test_overtaken_import_only_releases_guard() {
        let mut session = ImportSession::new();
        session.select_file("/tmp/a.json".to_string());
        let attempt = session.begin_import();

        session.select_file("/tmp/b.json".to_string());
        assert!(session.is_importing());
        assert!(session.is_consistent());

        assert!(!session.record_persisted(attempt, Some("bA".to_string())));
        assert!(!session.finish(attempt, true));

        assert_eq!(session.selected_file(), "/tmp/b.json");
        assert_eq!(session.status(), ImportStatus::Idle);
        assert!(session.backup_id().is_none());
        assert!(!session.is_importing());
    }

    #[test]
    fn test_overtaken_failure_keeps_cleared_state() {
        let mut session = ImportSession::new();
        session.select_file("/tmp/a.json".to_string());
        let attempt = session.begin_import();

        session.clear();
        assert!(!session.fail(attempt, "disk full".to_string()));

        assert_eq!(session, ImportSession::new());
    }

    #[test]
    fn test_abandon_only_touches_in_flight_import() {
        let mut session = ImportSession::new();
        session.abandon_import(0, "interrupted");
        assert_eq!(session, ImportSession::new());

        session.select_file("/tmp/a.json".to_string());
        let attempt = session.begin_import();
        session.abandon_import(attempt, "interrupted");
        assert_eq!(session.status(), ImportStatus::Error);
        assert_eq!(session.error_message(), Some("interrupted"));
        assert!(!session.is_importing());

        let attempt = session.begin_import();
        session.reset_status();
        session.abandon_import(attempt, "interrupted");
        assert_eq!(session.status(), ImportStatus::Idle);
        assert!(!session.is_importing());
    }

    #[test]
    fn test_serializes_for_hosts() {
        let mut session = ImportSession::new();
        session.select_file("/tmp/a.json".to_string());
        let attempt = session.begin_import();
        session.record_persisted(attempt, Some("b1".to_string()));
        session.finish(attempt, false);

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["selectedFile"], "/tmp/a.json");
        assert_eq!(json["status"], "partial-success");
        assert_eq!(json["backupId"], "b1");
        assert_eq!(json["errorMessage"], serde_json::Value::Null);
        assert_eq!(json["isImporting"], false);
        assert!(json.get("attempt").is_none());
    }
}
