//! Import/export backends and live sync
//!
//! - `FileConfigBackend` / `FileLiveSync`: JSON document on disk
//! - `MockBackend` / `MockLiveSync`: for tests

mod error;
mod traits;
mod file;
mod live;
mod mock;

pub use error::{BackendError, BackendResult};
pub use traits::{ConfigBackend, LiveSync};
pub use file::{FileConfigBackend, BackupEntry};
pub use live::FileLiveSync;
pub use mock::{CallLog, MockBackend, MockLiveSync, MockImportMode, MockExportMode};
