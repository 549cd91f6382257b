//! Import session and the controller driving it

mod state;
mod controller;
mod naming;
pub mod messages;

pub use state::ImportSession;
pub use controller::{ImportExportController, ControllerDeps, SessionScope};
pub use naming::{ExportNaming, default_export_file_name};
