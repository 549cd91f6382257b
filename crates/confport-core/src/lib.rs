//! confport Core
//!
//! Configuration import/export with live reconciliation.
//! This crate is front-end agnostic: file pickers, notices and the
//! configuration store are traits, so the same flows run behind a CLI,
//! a desktop shell, or tests.
//!
//! ## Import flow
//!
//! ```rust,ignore
//! use confport_core::{ImportExportController, ControllerDeps};
//!
//! let controller = ImportExportController::new(deps);
//! controller.select_import_file().await;
//! controller.import_config().await;
//!
//! // success, partial-success (persisted but live sync failed) or error
//! let session = controller.snapshot();
//! println!("{}", session.status());
//! ```

pub mod types;
pub mod logging;
pub mod settings;
pub mod dialog;
pub mod backend;
pub mod notify;
pub mod session;

// Re-export commonly used types
pub use types::{
    ImportStatus, ImportResult, ExportResult, SyncOutcome,
    Notice, NoticeLevel,
    ConfigDocument, ProviderConfig,
};

pub use logging::{Logger, LogLevel, NoOpLogger, ConsoleLogger, FileLogger};

pub use settings::{TransferSettings, SettingsFile, SettingsError};

pub use dialog::{FileDialog, DialogError};

pub use backend::{
    ConfigBackend, LiveSync, BackendError, BackendResult,
    FileConfigBackend, FileLiveSync, BackupEntry,
};

pub use notify::{Notifier, NotifyError, LoggerNotifier};

pub use session::{
    ImportSession, ImportExportController, ControllerDeps, SessionScope,
    ExportNaming, default_export_file_name,
};
