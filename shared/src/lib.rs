//! Lamp Shared Protocol Types
//!
//! This crate provides the command table and line codec for talking to the
//! lamp controller, along with the colour quantisation used by the colour
//! sender. It performs no I/O.

pub mod codec;
pub mod color;
pub mod command;

// Re-export commonly used types at crate root
pub use codec::{CodecError, TransmissionLine, WireDialect, LINE_TERMINATOR};
pub use color::{quantize, ColorError, Rgb, Rgba};
pub use command::{CommandArgs, CommandError, LampCommand, LampRequest};

/// Link parameters shared by every transport
pub mod link {
    /// Bluetooth Serial Port Profile service class UUID
    pub const SPP_UUID: &str = "00001101-0000-1000-8000-00805F9B34FB";

    /// Pause after connecting before the first write.
    ///
    /// The lamp's serial interface needs this long to settle after a fresh
    /// connection; writes sent earlier are dropped.
    pub const SETTLE_DELAY_MS: u64 = 300;

    /// Bluetooth address of the lamp
    pub const DEFAULT_DEVICE_ADDR: &str = "00:06:66:46:5B:B2";

    /// RFCOMM channel the lamp's SPP module listens on
    pub const DEFAULT_RFCOMM_CHANNEL: u8 = 1;

    /// Serial device bound to the lamp by `rfcomm bind`
    pub const DEFAULT_SERIAL_PORT: &str = "/dev/rfcomm0";

    /// Baud rate of the lamp's serial interface
    pub const DEFAULT_BAUD_RATE: u32 = 115_200;
}
