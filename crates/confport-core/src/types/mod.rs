//! Core types shared by the collaborators and the controller

mod status;
mod transfer;
mod notice;
mod document;

pub use status::ImportStatus;
pub use transfer::{ImportResult, ExportResult, SyncOutcome};
pub use notice::{Notice, NoticeLevel};
pub use document::{ConfigDocument, ProviderConfig, DOCUMENT_VERSION};
