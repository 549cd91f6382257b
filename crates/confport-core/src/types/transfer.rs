//! Results returned by the import/export and live-sync collaborators

use serde::{Deserialize, Serialize};

/// Outcome of `import_config_from_file`
///
/// Content-level problems (corrupt or invalid backup) come back as
/// `success: false`; transport-level failures are reported as errors instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Id of the safety backup taken before the store was overwritten
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_id: Option<String>,
}

impl ImportResult {
    pub fn succeeded(backup_id: Option<String>) -> Self {
        Self { success: true, message: None, backup_id }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, message: Some(message.into()), backup_id: None }
    }

    /// Failure without a message; callers fall back to generic wording
    pub fn failure_without_message() -> Self {
        Self { success: false, message: None, backup_id: None }
    }
}

/// Outcome of `export_config_to_file`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

impl ExportResult {
    pub fn succeeded(file_path: impl Into<String>) -> Self {
        Self { success: true, message: None, file_path: Some(file_path.into()) }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, message: Some(message.into()), file_path: None }
    }
}

/// Outcome of `sync_current_providers_live`
///
/// Live sync is best effort and never fails with an error value; the cause
/// travels in `error` for logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncOutcome {
    pub fn ok() -> Self {
        Self { ok: true, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { ok: false, error: Some(error.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_result_wire_shape() {
        let result = ImportResult::succeeded(Some("backup_20240101_120000".to_string()));
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"backupId\":\"backup_20240101_120000\""));
        assert!(!json.contains("message"));

        let parsed: ImportResult =
            serde_json::from_str(r#"{"success":false,"message":"bad format"}"#).unwrap();
        assert_eq!(parsed, ImportResult::failure("bad format"));
    }

    #[test]
    fn test_sync_outcome_constructors() {
        assert!(SyncOutcome::ok().ok);
        let failed = SyncOutcome::failed("x");
        assert!(!failed.ok);
        assert_eq!(failed.error.as_deref(), Some("x"));
    }
}
