//! File dialog driven by pre-recorded answers

use std::collections::VecDeque;
use std::path::PathBuf;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::traits::{DialogError, DialogResult, FileDialog};

/// One scripted reply to a picker invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogAnswer {
    /// The user picked this path
    Path(PathBuf),
    /// The user dismissed the dialog
    Cancel,
    /// The picker itself failed
    Fail(String),
}

impl DialogAnswer {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        DialogAnswer::Path(path.into())
    }

    fn into_result(self) -> DialogResult<Option<PathBuf>> {
        match self {
            DialogAnswer::Path(path) => Ok(Some(path)),
            DialogAnswer::Cancel => Ok(None),
            DialogAnswer::Fail(message) => Err(DialogError::Other(message)),
        }
    }
}

/// Dialog that answers from two queues, one per picker kind
///
/// An exhausted queue behaves like a cancelled dialog. Every save request
/// records the suggested file name.
#[derive(Debug, Default)]
pub struct ScriptedDialog {
    open_answers: Mutex<VecDeque<DialogAnswer>>,
    save_answers: Mutex<VecDeque<DialogAnswer>>,
    suggested_names: Mutex<Vec<String>>,
    open_calls: Mutex<usize>,
}

impl ScriptedDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next `open_file` call
    pub fn then_open(self, answer: DialogAnswer) -> Self {
        self.open_answers.lock().push_back(answer);
        self
    }

    /// Queue a reply for the next `save_file` call
    pub fn then_save(self, answer: DialogAnswer) -> Self {
        self.save_answers.lock().push_back(answer);
        self
    }

    /// File names suggested to `save_file`, in call order
    pub fn suggested_names(&self) -> Vec<String> {
        self.suggested_names.lock().clone()
    }

    pub fn open_calls(&self) -> usize {
        *self.open_calls.lock()
    }
}

#[async_trait]
impl FileDialog for ScriptedDialog {
    async fn open_file(&self) -> DialogResult<Option<PathBuf>> {
        *self.open_calls.lock() += 1;
        let answer = self.open_answers.lock().pop_front();
        answer.map_or(Ok(None), DialogAnswer::into_result)
    }

    async fn save_file(&self, default_file_name: &str) -> DialogResult<Option<PathBuf>> {
        self.suggested_names.lock().push(default_file_name.to_string());
        let answer = self.save_answers.lock().pop_front();
        answer.map_or(Ok(None), DialogAnswer::into_result)
    }
}
