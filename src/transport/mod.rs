pub mod bluetooth;
pub mod rfcomm;
pub mod serial;
pub mod tcp;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;

pub use bluetooth::{SppConnector, DEFAULT_PROFILE_TIMEOUT, SPP_SERVICE_UUID};
pub use rfcomm::{RfcommConnector, RfcommTransportStream};
pub use serial::{SerialConnector, SerialPortOpener, SerialTransportStream};
pub use tcp::{TcpConnector, TcpTransportStream};
pub use traits::{BoxedStream, PortOpener, TransportConnector, TransportStream};
