//! User-facing failure notices.

use log::warn;

/// Receives a short message when a save or load fails.
///
/// A GUI would show a dialog; the default [`LogNotifier`] writes a log
/// record. The detailed error is still returned to the caller.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Sends notices to the `log` facade at warning level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        warn!(notice = message; "User notice");
    }
}
