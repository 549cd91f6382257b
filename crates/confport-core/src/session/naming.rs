//! Default export file names

use chrono::NaiveDateTime;

use crate::settings::TransferSettings;

/// Prefix and extension used to suggest export file names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportNaming {
    pub prefix: String,
    pub extension: String,
}

impl Default for ExportNaming {
    fn default() -> Self {
        Self::from_settings(&TransferSettings::default())
    }
}

impl ExportNaming {
    pub fn new(prefix: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    pub fn from_settings(settings: &TransferSettings) -> Self {
        Self::new(settings.export_prefix.clone(), settings.export_extension.clone())
    }

    pub fn file_name(&self, at: NaiveDateTime) -> String {
        default_export_file_name(&self.prefix, &self.extension, at)
    }
}

/// `prefix-YYYYMMDD_HHMMSS.ext` for the given local time
pub fn default_export_file_name(prefix: &str, extension: &str, at: NaiveDateTime) -> String {
    let extension = extension.trim_start_matches('.');
    format!("{}-{}.{}", prefix, at.format("%Y%m%d_%H%M%S"), extension)
}
