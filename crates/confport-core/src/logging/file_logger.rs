//! File-based debug logger for troubleshooting
//!
//! Writes to a single append-only file in the temp directory. Useful when
//! the host (a desktop shell, a service manager) swallows stdout/stderr.
//!
//! Controlled by two environment variables read on first use:
//! - `CONFPORT_DEBUG` (`1`/`true` enables, anything else disables; default on)
//! - `CONFPORT_LOG_LEVEL` (`trace`..`error`; default `debug`)

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use super::traits::{LogLevel, Logger};

struct FileLoggerState {
    file: Option<File>,
    min_level: LogLevel,
    enabled: bool,
}

impl FileLoggerState {
    fn new() -> Self {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(default_log_path())
            .ok();

        let enabled = std::env::var("CONFPORT_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(true);
        let min_level = std::env::var("CONFPORT_LOG_LEVEL")
            .ok()
            .and_then(|v| LogLevel::parse(&v))
            .unwrap_or(LogLevel::Debug);

        Self { file, min_level, enabled }
    }

    fn write(&mut self, level: LogLevel, module: &str, message: &str) {
        if !self.enabled || level < self.min_level {
            return;
        }

        if let Some(ref mut file) = self.file {
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let _ = writeln!(file, "[{}] [{}] [{}] {}", timestamp, level, module, message);
            let _ = file.flush();
        }
    }
}

static LOGGER: Lazy<Mutex<FileLoggerState>> = Lazy::new(|| Mutex::new(FileLoggerState::new()));

fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("confport-debug.log")
}

/// Log a message at the specified level
pub fn log(level: LogLevel, module: &str, message: &str) {
    LOGGER.lock().write(level, module, message);
}

/// Get the path to the log file
pub fn log_file_path() -> PathBuf {
    default_log_path()
}

/// Truncate the log file and reopen it
pub fn clear_log() {
    let path = log_file_path();
    if let Ok(file) = File::create(&path) {
        drop(file);
    }
    LOGGER.lock().file = OpenOptions::new().create(true).append(true).open(&path).ok();
}

/// `Logger` adapter over the global debug file, tagging every line with a module name
#[derive(Debug, Clone)]
pub struct FileLogger {
    module: String,
}

impl FileLogger {
    pub fn new(module: impl Into<String>) -> Self {
        Self { module: module.into() }
    }
}

impl Logger for FileLogger {
    fn debug(&self, message: &str) {
        log(LogLevel::Debug, &self.module, message);
    }

    fn info(&self, message: &str) {
        log(LogLevel::Info, &self.module, message);
    }

    fn warn(&self, message: &str) {
        log(LogLevel::Warn, &self.module, message);
    }

    fn error(&self, message: &str) {
        log(LogLevel::Error, &self.module, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path_in_temp_dir() {
        let path = log_file_path();
        assert!(path.starts_with(std::env::temp_dir()));
        assert!(path.to_string_lossy().ends_with("confport-debug.log"));
    }

    #[test]
    fn test_file_logger_does_not_panic() {
        let logger = FileLogger::new("tests");
        logger.debug("debug message");
        logger.info("info message");
        logger.warn("warn message");
        logger.error("error message");
    }
}
