//! Backend error types

use thiserror::Error;

/// Transport-level failures of the import/export backend
///
/// A backup file that parses but is unusable is not an error; it comes back
/// as `ImportResult { success: false, .. }`.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Backup not found: {0}")]
    BackupNotFound(String),

    #[error("Invalid backup id: {0}")]
    InvalidBackupId(String),

    #[error("{0}")]
    Other(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_displays_bare_message() {
        assert_eq!(BackendError::Other("disk full".to_string()).to_string(), "disk full");
    }

    #[test]
    fn test_io_conversion() {
        let err: BackendError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, BackendError::Io(_)));
        assert_eq!(err.to_string(), "IO error: gone");
    }
}
