//! Import status values

use serde::{Deserialize, Serialize};

/// Externally observable status of an import session
///
/// `Idle` is both the initial state and the state reached by an explicit
/// clear/reset. `Success`, `PartialSuccess` and `Error` are resting states:
/// a new import attempt from any of them moves back through `Importing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportStatus {
    #[default]
    Idle,
    Importing,
    Success,
    /// The backup was persisted but the live provider state could not be synced
    PartialSuccess,
    Error,
}

impl ImportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportStatus::Idle => "idle",
            ImportStatus::Importing => "importing",
            ImportStatus::Success => "success",
            ImportStatus::PartialSuccess => "partial-success",
            ImportStatus::Error => "error",
        }
    }

    /// Whether this is one of the outcomes an import attempt resolves to
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            ImportStatus::Success | ImportStatus::PartialSuccess | ImportStatus::Error
        )
    }
}

impl std::fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
