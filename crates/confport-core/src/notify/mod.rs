//! Notifications to the host: data-changed callback and user-facing notices

mod traits;
mod logger;
mod recording;

pub use traits::{Notifier, NotifyError, NotifyResult};
pub use logger::LoggerNotifier;
pub use recording::RecordingNotifier;
