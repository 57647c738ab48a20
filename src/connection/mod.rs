//! Connection setup for the lamp link
//!
//! This module handles:
//! - Transport selection (SPP, direct RFCOMM, serial device, TCP simulation)
//! - Configuration defaults and `LAMP_*` environment overrides

mod config;
mod connector;

pub use config::{vars, ConnectionConfig, LinkConfig, TransportKind, DEFAULT_TCP_ADDR};
pub use connector::LampConnector;
