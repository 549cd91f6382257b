//! File pickers for the command line
//!
//! Paths given as arguments answer the pickers directly. With `--pick` the
//! native dialogs are used instead (requires the `native-dialog` feature).

use std::path::PathBuf;

use async_trait::async_trait;
use confport_core::dialog::{DialogResult, FileDialog};

pub struct ArgDialog {
    open: Option<PathBuf>,
    out: Option<PathBuf>,
    base_dir: PathBuf,
    pick: bool,
}

impl ArgDialog {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            open: None,
            out: None,
            base_dir: base_dir.into(),
            pick: false,
        }
    }

    pub fn with_open(mut self, path: Option<PathBuf>) -> Self {
        self.open = path;
        self
    }

    /// Export destination; a directory receives the suggested file name
    pub fn with_out(mut self, path: Option<PathBuf>) -> Self {
        self.out = path;
        self
    }

    pub fn with_pick(mut self, pick: bool) -> Self {
        self.pick = pick;
        self
    }
}

#[async_trait]
impl FileDialog for ArgDialog {
    async fn open_file(&self) -> DialogResult<Option<PathBuf>> {
        if let Some(path) = &self.open {
            return Ok(Some(path.clone()));
        }
        if self.pick {
            return native::open_file().await;
        }
        Ok(None)
    }

    async fn save_file(&self, default_file_name: &str) -> DialogResult<Option<PathBuf>> {
        match &self.out {
            Some(path) if path.is_dir() => Ok(Some(path.join(default_file_name))),
            Some(path) => Ok(Some(path.clone())),
            None if self.pick => native::save_file(default_file_name).await,
            None => Ok(Some(self.base_dir.join(default_file_name))),
        }
    }
}

#[cfg(feature = "native-dialog")]
mod native {
    use super::*;
    use rfd::AsyncFileDialog;

    pub async fn open_file() -> DialogResult<Option<PathBuf>> {
        let picked = AsyncFileDialog::new()
            .set_title("Select configuration to import")
            .add_filter("Configuration", &["json", "yaml", "yml"])
            .pick_file()
            .await;
        Ok(picked.map(|handle| handle.path().to_path_buf()))
    }

    pub async fn save_file(default_file_name: &str) -> DialogResult<Option<PathBuf>> {
        let picked = AsyncFileDialog::new()
            .set_title("Export configuration")
            .set_file_name(default_file_name)
            .save_file()
            .await;
        Ok(picked.map(|handle| handle.path().to_path_buf()))
    }
}

#[cfg(not(feature = "native-dialog"))]
mod native {
    use super::*;
    use confport_core::dialog::DialogError;

    const UNAVAILABLE: &str = "built without the native-dialog feature";

    pub async fn open_file() -> DialogResult<Option<PathBuf>> {
        Err(DialogError::Unavailable(UNAVAILABLE.to_string()))
    }

    pub async fn save_file(_default_file_name: &str) -> DialogResult<Option<PathBuf>> {
        Err(DialogError::Unavailable(UNAVAILABLE.to_string()))
    }
}
