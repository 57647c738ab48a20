//! Runtime-selected connector

use anyhow::Result;
use async_trait::async_trait;

use super::config::LinkConfig;
use crate::transport::{
    BoxedStream, RfcommConnector, SerialConnector, SppConnector, TcpConnector,
    TransportConnector,
};

/// Connector for whichever transport the configuration names
pub enum LampConnector {
    Spp(SppConnector),
    Rfcomm(RfcommConnector),
    Serial(SerialConnector),
    Tcp(TcpConnector),
}

impl LampConnector {
    pub fn from_config(link: &LinkConfig) -> Self {
        match link {
            LinkConfig::Spp {
                address,
                profile_timeout,
            } => Self::Spp(SppConnector::new(*address).with_timeout(*profile_timeout)),
            LinkConfig::Rfcomm { address, channel } => {
                Self::Rfcomm(RfcommConnector::new(*address, *channel))
            }
            LinkConfig::Serial { path, baud } => Self::Serial(SerialConnector::new(path, *baud)),
            LinkConfig::Tcp { address } => Self::Tcp(TcpConnector::new(address)),
        }
    }
}

#[async_trait]
impl TransportConnector for LampConnector {
    type Stream = BoxedStream;

    async fn connect(&self) -> Result<Self::Stream> {
        let stream: BoxedStream = match self {
            Self::Spp(c) => Box::new(c.connect().await?),
            Self::Rfcomm(c) => Box::new(c.connect().await?),
            Self::Serial(c) => Box::new(c.connect().await?),
            Self::Tcp(c) => Box::new(c.connect().await?),
        };
        Ok(stream)
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Spp(c) => c.name(),
            Self::Rfcomm(c) => c.name(),
            Self::Serial(c) => c.name(),
            Self::Tcp(c) => c.name(),
        }
    }

    fn target(&self) -> String {
        match self {
            Self::Spp(c) => c.target(),
            Self::Rfcomm(c) => c.target(),
            Self::Serial(c) => c.target(),
            Self::Tcp(c) => c.target(),
        }
    }
}
