//! User-facing texts of the import/export flows

pub const NO_FILE_SELECTED: &str = "Please select a configuration file to import";
pub const SELECT_FILE_FAILED: &str = "Failed to open the file dialog";

pub const IMPORT_SUCCEEDED: &str = "Configuration imported successfully";
pub const IMPORT_CORRUPTED: &str =
    "Import failed: the file may be corrupted or in an invalid format";
pub const IMPORT_FAILED: &str = "Import failed";
pub const IMPORT_INTERRUPTED: &str = "Import was interrupted before it completed";
pub const PARTIAL_SUCCESS: &str = "Configuration imported, but the active provider could not be synced. Please re-select the provider manually.";

pub const EXPORT_NO_DESTINATION: &str = "Export cancelled: no destination selected";
pub const EXPORT_DIALOG_FAILED: &str = "Failed to open the save dialog";
pub const EXPORT_FAILED: &str = "Export failed";
