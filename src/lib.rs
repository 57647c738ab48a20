//! Lamp control
//!
//! Sends control codes to a microcontroller-driven lamp over Bluetooth SPP,
//! RFCOMM, a serial device, or a TCP stand-in.

pub mod color;
pub mod command;
pub mod connection;
pub mod intent;
pub mod transport;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing, logging to stderr
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();
}
