//! Colour picker transmitter
//!
//! Keeps a serial connection open and writes `on <rrggbb>;` each time the
//! selected colour changes.

mod event;
mod sender;

pub use event::ColorEvent;
pub use sender::ColorSender;
