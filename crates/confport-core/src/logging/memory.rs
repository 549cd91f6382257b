//! In-memory logger that keeps every line for later inspection

use parking_lot::Mutex;

use super::traits::{LogLevel, Logger};

/// Logger that records `(level, message)` pairs
///
/// Used by tests to check that a failure was logged rather than surfaced,
/// and by front ends that want to show a log pane after an operation.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded lines, oldest first
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().clone()
    }

    /// Messages recorded at exactly `level`
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Whether any line at `level` contains `needle`
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.lines
            .lock()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.lines.lock().push((level, message.to_string()));
    }
}

impl Logger for MemoryLogger {
    fn debug(&self, message: &str) {
        self.push(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_logger_records_levels() {
        let logger = MemoryLogger::new();
        logger.info("import started");
        logger.warn("live sync failed: provider missing");

        assert_eq!(logger.lines().len(), 2);
        assert!(logger.contains(LogLevel::Warn, "provider missing"));
        assert!(!logger.contains(LogLevel::Error, "provider missing"));
        assert_eq!(logger.messages_at(LogLevel::Info), vec!["import started".to_string()]);

        logger.clear();
        assert!(logger.lines().is_empty());
    }
}
