//! Notifier that routes notices into a logger

use std::sync::Arc;

use async_trait::async_trait;

use super::traits::{Notifier, NotifyResult};
use crate::logging::Logger;
use crate::types::{Notice, NoticeLevel};

/// Notifier for headless hosts: notices become log lines
pub struct LoggerNotifier {
    logger: Arc<dyn Logger>,
}

impl LoggerNotifier {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

#[async_trait]
impl Notifier for LoggerNotifier {
    async fn import_succeeded(&self) -> NotifyResult<()> {
        self.logger.debug("Configuration changed; dependent views refreshed");
        Ok(())
    }

    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => self.logger.info(&notice.message),
            NoticeLevel::Warning => self.logger.warn(&notice.message),
            NoticeLevel::Error => self.logger.error(&notice.message),
        }
    }
}
