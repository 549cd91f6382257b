//! File picker abstractions
//!
//! The pickers themselves live in front ends; the core only needs the
//! open/save contract and a scripted implementation.

mod traits;
mod scripted;

pub use traits::{FileDialog, DialogError, DialogResult};
pub use scripted::{ScriptedDialog, DialogAnswer};
