//! File picker abstraction

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a file picker
///
/// Cancellation is not an error: pickers return `Ok(None)` when the user
/// dismisses the dialog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogError {
    #[error("File dialog unavailable: {0}")]
    Unavailable(String),

    #[error("File dialog error: {0}")]
    Other(String),
}

pub type DialogResult<T> = Result<T, DialogError>;

/// File picker used to choose the import source and export destination
///
/// Implementations:
/// - `ScriptedDialog`: queued answers, for tests and non-interactive runs
/// - Native pickers provided by front ends
#[async_trait]
pub trait FileDialog: Send + Sync {
    /// Ask for an existing file to import; `None` on cancellation
    async fn open_file(&self) -> DialogResult<Option<PathBuf>>;

    /// Ask where to write an export, suggesting `default_file_name`; `None` on cancellation
    async fn save_file(&self, default_file_name: &str) -> DialogResult<Option<PathBuf>>;
}
