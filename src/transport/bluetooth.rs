//! Bluetooth transport through the Serial Port Profile
//!
//! Instead of guessing the RFCOMM channel, register an SPP client profile
//! with BlueZ and let it resolve the channel through SDP. BlueZ hands the
//! connected socket back as a connect request on the profile handle.

use crate::transport::rfcomm::RfcommTransportStream;
use crate::transport::traits::TransportConnector;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use bluer::rfcomm::{Profile, Role};
use bluer::{Adapter, Address, Uuid};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};

/// Default bound on the SPP profile handshake
pub const DEFAULT_PROFILE_TIMEOUT: Duration = Duration::from_secs(10);

/// SPP service class UUID, `00001101-0000-1000-8000-00805F9B34FB`
pub const SPP_SERVICE_UUID: Uuid = Uuid::from_u128(0x00001101_0000_1000_8000_00805f9b34fb);

/// Get the default Bluetooth adapter, powered on
pub async fn get_adapter(session: &bluer::Session) -> Result<Adapter> {
    let adapter = session.default_adapter().await?;
    adapter.set_powered(true).await?;
    Ok(adapter)
}

/// Bluetooth connector that reaches the lamp through SPP
pub struct SppConnector {
    address: Address,
    service: Uuid,
    profile_timeout: Duration,
}

impl SppConnector {
    /// Create a new SPP connector for a specific device address
    pub fn new(address: Address) -> Self {
        Self {
            address,
            service: SPP_SERVICE_UUID,
            profile_timeout: DEFAULT_PROFILE_TIMEOUT,
        }
    }

    /// Bound how long to wait for BlueZ to complete the profile connection
    pub fn with_timeout(mut self, profile_timeout: Duration) -> Self {
        self.profile_timeout = profile_timeout;
        self
    }

    pub fn address(&self) -> Address {
        self.address
    }

    async fn connect_profile(&self) -> Result<RfcommTransportStream> {
        let session = bluer::Session::new().await?;
        let adapter = get_adapter(&session).await?;

        let profile = Profile {
            uuid: self.service,
            name: Some("lamp-control".into()),
            role: Some(Role::Client),
            require_authentication: Some(false),
            require_authorization: Some(false),
            auto_connect: Some(false),
            ..Default::default()
        };
        let mut handle = session
            .register_profile(profile)
            .await
            .context("Failed to register SPP profile")?;

        let device = adapter.device(self.address)?;
        debug!("[BT] Requesting SPP connection to {}", self.address);

        let connect = device.connect_profile(&self.service);
        tokio::pin!(connect);

        let request = tokio::select! {
            result = &mut connect => {
                result.map_err(|e| anyhow!("SPP connect failed: {}", e))?;
                handle.next().await
            }
            request = handle.next() => request,
        };
        let request = request.ok_or_else(|| anyhow!("BlueZ closed the SPP profile"))?;

        let peer = request.device();
        let stream = request.accept()?;
        info!("[BT] Connected to {} via SPP", peer);
        Ok(RfcommTransportStream::new(stream, peer))
    }
}

#[async_trait]
impl TransportConnector for SppConnector {
    type Stream = RfcommTransportStream;

    /// Connect to the lamp over SPP
    async fn connect(&self) -> Result<Self::Stream> {
        info!("[Transport] Attempting to connect via Bluetooth SPP...");
        timeout(self.profile_timeout, self.connect_profile())
            .await
            .map_err(|_| anyhow!("SPP connect timed out after {:?}", self.profile_timeout))?
    }

    fn name(&self) -> &'static str {
        "Bluetooth"
    }

    fn target(&self) -> String {
        self.address.to_string()
    }
}
