//! Notifier that records every call

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::traits::{Notifier, NotifyError, NotifyResult};
use crate::backend::CallLog;
use crate::types::Notice;

/// Records notices and data-changed calls; can be told to reject the latter
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
    data_changed: AtomicUsize,
    reject_with: Option<String>,
    log: CallLog,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `import_succeeded` call fail with `message`
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            reject_with: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn error_notices(&self) -> Vec<Notice> {
        self.notices.lock().iter().filter(|n| n.is_error()).cloned().collect()
    }

    /// How many times dependent views were told about an import
    pub fn data_changed_calls(&self) -> usize {
        self.data_changed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn import_succeeded(&self) -> NotifyResult<()> {
        self.data_changed.fetch_add(1, Ordering::SeqCst);
        self.log.record("notify");
        match &self.reject_with {
            Some(message) => Err(NotifyError(message.clone())),
            None => Ok(()),
        }
    }

    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_and_rejects() {
        let notifier = RecordingNotifier::rejecting("view gone");
        let err = notifier.import_succeeded().await.unwrap_err();
        assert_eq!(err.to_string(), "Notification failed: view gone");
        assert_eq!(notifier.data_changed_calls(), 1);

        notifier.notify(Notice::error("boom"));
        notifier.notify(Notice::success("fine"));
        assert_eq!(notifier.notices().len(), 2);
        assert_eq!(notifier.error_notices(), vec![Notice::error("boom")]);
    }
}
