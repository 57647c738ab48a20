//! Transport trait abstraction for pluggable lamp links

use anyhow::Result;
use async_trait::async_trait;
use lamp_shared::TransmissionLine;
use tokio::io::{AsyncRead, AsyncWrite};

/// A connected link to the lamp
#[async_trait]
pub trait TransportStream: AsyncRead + AsyncWrite + Send + Unpin + 'static {
    /// Close the link gracefully
    async fn shutdown(&mut self) -> Result<()>;

    /// Write one line in a single write, then flush
    async fn write_line(&mut self, line: &TransmissionLine) -> Result<()> {
        let payload = line.to_bytes();
        tokio::io::AsyncWriteExt::write_all(&mut *self, &payload).await?;
        tokio::io::AsyncWriteExt::flush(&mut *self).await?;
        Ok(())
    }
}

/// Type-erased stream, for picking a transport at runtime
pub type BoxedStream = Box<dyn TransportStream>;

#[async_trait]
impl TransportStream for BoxedStream {
    async fn shutdown(&mut self) -> Result<()> {
        (**self).shutdown().await
    }
}

/// Factory for connections to a fixed target
#[async_trait]
pub trait TransportConnector: Send + Sync {
    /// The stream type this connector produces
    type Stream: TransportStream;

    /// Attempt to connect, returning a stream on success
    async fn connect(&self) -> Result<Self::Stream>;

    /// Human-readable name for this transport
    fn name(&self) -> &'static str;

    /// Address, path or socket this connector targets
    fn target(&self) -> String;
}

/// Opens a stream to a target chosen at call time, such as a device path
#[async_trait]
pub trait PortOpener: Send + Sync {
    type Stream: TransportStream;

    async fn open(&self, target: &str) -> Result<Self::Stream>;
}
