//! Console notices, counting errors for the exit code

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use confport_core::notify::{LoggerNotifier, Notifier, NotifyResult};
use confport_core::{Logger, Notice};

pub struct CliNotifier {
    inner: LoggerNotifier,
    errors: AtomicUsize,
}

impl CliNotifier {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            inner: LoggerNotifier::new(logger),
            errors: AtomicUsize::new(0),
        }
    }

    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for CliNotifier {
    async fn import_succeeded(&self) -> NotifyResult<()> {
        self.inner.import_succeeded().await
    }

    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.notify(notice);
    }
}
