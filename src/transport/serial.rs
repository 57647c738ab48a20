//! Serial transport for device files such as `/dev/rfcomm0`

use crate::transport::traits::{PortOpener, TransportConnector, TransportStream};
use anyhow::{Context as _, Result};
use async_trait::async_trait;
use lamp_shared::link::DEFAULT_BAUD_RATE;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::debug;

/// Serial port wrapper implementing TransportStream
pub struct SerialTransportStream {
    inner: SerialStream,
    path: String,
}

impl SerialTransportStream {
    pub fn new(stream: SerialStream, path: impl Into<String>) -> Self {
        Self {
            inner: stream,
            path: path.into(),
        }
    }
}

impl AsyncRead for SerialTransportStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

impl AsyncWrite for SerialTransportStream {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.inner).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_shutdown(cx)
    }
}

#[async_trait]
impl TransportStream for SerialTransportStream {
    async fn shutdown(&mut self) -> Result<()> {
        // Serial ports have no half-close; flushing is all there is to do.
        // The descriptor closes on drop.
        tokio::io::AsyncWriteExt::flush(&mut self.inner).await?;
        debug!("[Serial] Closed {}", self.path);
        Ok(())
    }
}

/// Open a serial device at the given baud rate
pub fn open_serial(path: &str, baud: u32) -> Result<SerialTransportStream> {
    let stream = tokio_serial::new(path, baud)
        .open_native_async()
        .with_context(|| format!("Unable to open serial port ({})", path))?;
    debug!("[Serial] Opened {} at {} baud", path, baud);
    Ok(SerialTransportStream::new(stream, path))
}

/// Connector for a fixed serial device
#[derive(Debug, Clone)]
pub struct SerialConnector {
    path: String,
    baud: u32,
}

impl SerialConnector {
    pub fn new(path: impl Into<String>, baud: u32) -> Self {
        Self {
            path: path.into(),
            baud,
        }
    }

    pub fn baud(&self) -> u32 {
        self.baud
    }
}

#[async_trait]
impl TransportConnector for SerialConnector {
    type Stream = SerialTransportStream;

    async fn connect(&self) -> Result<Self::Stream> {
        open_serial(&self.path, self.baud)
    }

    fn name(&self) -> &'static str {
        "Serial"
    }

    fn target(&self) -> String {
        self.path.clone()
    }
}

/// Opens whichever serial device path it is asked for
#[derive(Debug, Clone, Copy)]
pub struct SerialPortOpener {
    baud: u32,
}

impl SerialPortOpener {
    pub fn new(baud: u32) -> Self {
        Self { baud }
    }
}

impl Default for SerialPortOpener {
    fn default() -> Self {
        Self::new(DEFAULT_BAUD_RATE)
    }
}

#[async_trait]
impl PortOpener for SerialPortOpener {
    type Stream = SerialTransportStream;

    async fn open(&self, target: &str) -> Result<Self::Stream> {
        open_serial(target, self.baud)
    }
}
