//! User-facing notifications
//!
//! Short, human-readable messages ("Unable to connect.") shown to whoever
//! triggered a dispatch. These are separate from logging: the binaries print
//! them on stdout while `tracing` output goes to stderr.

use tracing::info;

/// Receives short status messages meant for the user
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Prints notifications to stdout and records them in the log
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        info!("[Notify] {}", message);
        println!("{}", message);
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::Notifier;
    use std::sync::Mutex;

    /// Keeps every notification for later inspection
    #[derive(Debug, Default)]
    pub struct RecordingNotifier(Mutex<Vec<String>>);

    impl RecordingNotifier {
        pub fn messages(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }
}
