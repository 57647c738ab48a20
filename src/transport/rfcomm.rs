//! RFCOMM transport implementation for Bluetooth connections

use crate::transport::traits::{TransportConnector, TransportStream};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bluer::rfcomm::{SocketAddr as RfcommAddr, Stream as RfcommStream};
use bluer::Address;
use lamp_shared::link::DEFAULT_RFCOMM_CHANNEL;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tracing::{debug, info};

/// RFCOMM stream wrapper implementing TransportStream
pub struct RfcommTransportStream {
    inner: RfcommStream,
    peer_addr: Address,
}

impl RfcommTransportStream {
    /// Create a new RFCOMM transport stream
    pub fn new(stream: RfcommStream, peer_addr: Address) -> Self {
        Self {
            inner: stream,
            peer_addr,
        }
    }
}

impl AsyncRead for RfcommTransportStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

impl AsyncWrite for RfcommTransportStream {
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
impl TransportStream for RfcommTransportStream {
    async fn shutdown(&mut self) -> Result<()> {
        tokio::io::AsyncWriteExt::shutdown(&mut self.inner).await?;
        debug!("[BT] Closed link to {}", self.peer_addr);
        Ok(())
    }
}

/// Connects straight to a known RFCOMM channel, bypassing SDP
pub struct RfcommConnector {
    address: Address,
    channel: u8,
}

impl RfcommConnector {
    /// Create connector for a device address and channel
    pub fn new(address: Address, channel: u8) -> Self {
        Self { address, channel }
    }

    /// Create connector on the lamp's usual channel
    pub fn with_address(address: Address) -> Self {
        Self::new(address, DEFAULT_RFCOMM_CHANNEL)
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }
}

#[async_trait]
impl TransportConnector for RfcommConnector {
    type Stream = RfcommTransportStream;

    async fn connect(&self) -> Result<Self::Stream> {
        let socket_addr = RfcommAddr::new(self.address, self.channel);
        info!("[BT] Connecting to {} channel {}", self.address, self.channel);

        let stream = RfcommStream::connect(socket_addr)
            .await
            .map_err(|e| anyhow!("RFCOMM connect failed: {}", e))?;

        info!("[BT] Connected to {}", self.address);
        Ok(RfcommTransportStream::new(stream, self.address))
    }

    fn name(&self) -> &'static str {
        "RFCOMM"
    }

    fn target(&self) -> String {
        format!("{} channel {}", self.address, self.channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_with_address() {
        let addr = Address::new([0x00, 0x06, 0x66, 0x46, 0x5B, 0xB2]);
        let connector = RfcommConnector::with_address(addr);
        assert_eq!(connector.channel(), DEFAULT_RFCOMM_CHANNEL);
        assert_eq!(connector.name(), "RFCOMM");
    }

    #[test]
    fn test_connector_target() {
        let addr = Address::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        let connector = RfcommConnector::new(addr, 5);
        assert_eq!(connector.target(), "00:11:22:33:44:55 channel 5");
    }
}
