//! Command dispatch for the lamp
//!
//! This module handles:
//! - Resolving command identifiers and arguments into a transmission line
//! - Running the connect → settle → write → close sequence
//! - Reporting the outcome to the user

mod dispatcher;
pub mod notify;

pub use dispatcher::{CommandDispatcher, DispatchError, DispatchReport};
pub use notify::{ConsoleNotifier, Notifier};
