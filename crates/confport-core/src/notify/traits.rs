//! Notification channel trait

use async_trait::async_trait;
use thiserror::Error;

use crate::types::Notice;

/// The data-changed callback rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Notification failed: {0}")]
pub struct NotifyError(pub String);

pub type NotifyResult<T> = Result<T, NotifyError>;

/// Outbound notifications of the import/export flows
///
/// Implementations:
/// - `LoggerNotifier`: Writes notices through a `Logger`
/// - `RecordingNotifier`: Keeps everything for assertions
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Tell dependent views that persisted configuration changed
    ///
    /// Fire-and-forget from the caller's point of view: a failure is logged
    /// and never reaches the user.
    async fn import_succeeded(&self) -> NotifyResult<()>;

    /// Show a point-in-time notice (toast equivalent)
    fn notify(&self, notice: Notice);
}
