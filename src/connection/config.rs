//! Link configuration with environment overrides

use anyhow::{anyhow, Result};
use bluer::Address;
use lamp_shared::link::{
    DEFAULT_BAUD_RATE, DEFAULT_DEVICE_ADDR, DEFAULT_RFCOMM_CHANNEL, DEFAULT_SERIAL_PORT,
    SETTLE_DELAY_MS,
};
use lamp_shared::WireDialect;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::transport::DEFAULT_PROFILE_TIMEOUT;

/// Environment variables read by [`ConnectionConfig::from_env`]
pub mod vars {
    pub const TRANSPORT: &str = "LAMP_TRANSPORT";
    pub const DEVICE_ADDR: &str = "LAMP_DEVICE_ADDR";
    pub const RFCOMM_CHANNEL: &str = "LAMP_RFCOMM_CHANNEL";
    pub const SERIAL_PORT: &str = "LAMP_SERIAL_PORT";
    pub const BAUD: &str = "LAMP_BAUD";
    pub const TCP_ADDR: &str = "LAMP_TCP_ADDR";
    pub const SETTLE_MS: &str = "LAMP_SETTLE_MS";
    pub const PROFILE_TIMEOUT_MS: &str = "LAMP_PROFILE_TIMEOUT_MS";
    pub const DIALECT: &str = "LAMP_DIALECT";
}

/// Default address for the TCP stand-in
pub const DEFAULT_TCP_ADDR: &str = "127.0.0.1:9000";

/// Available transport types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportKind {
    /// Bluetooth Serial Port Profile, channel resolved by BlueZ
    #[default]
    Spp,
    /// Bluetooth RFCOMM on a fixed channel
    Rfcomm,
    /// Serial device file
    Serial,
    /// TCP simulation (for development)
    Tcp,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Spp => write!(f, "spp"),
            TransportKind::Rfcomm => write!(f, "rfcomm"),
            TransportKind::Serial => write!(f, "serial"),
            TransportKind::Tcp => write!(f, "tcp"),
        }
    }
}

impl FromStr for TransportKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "spp" | "bluetooth" => Ok(Self::Spp),
            "rfcomm" => Ok(Self::Rfcomm),
            "serial" => Ok(Self::Serial),
            "tcp" => Ok(Self::Tcp),
            other => Err(anyhow!("unknown transport: {}", other)),
        }
    }
}

/// Where and how to reach the lamp
#[derive(Debug, Clone, PartialEq)]
pub enum LinkConfig {
    Spp {
        address: Address,
        profile_timeout: Duration,
    },
    Rfcomm {
        address: Address,
        channel: u8,
    },
    Serial {
        path: String,
        baud: u32,
    },
    Tcp {
        address: String,
    },
}

impl LinkConfig {
    pub fn kind(&self) -> TransportKind {
        match self {
            LinkConfig::Spp { .. } => TransportKind::Spp,
            LinkConfig::Rfcomm { .. } => TransportKind::Rfcomm,
            LinkConfig::Serial { .. } => TransportKind::Serial,
            LinkConfig::Tcp { .. } => TransportKind::Tcp,
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::Spp {
            address: default_address(),
            profile_timeout: DEFAULT_PROFILE_TIMEOUT,
        }
    }
}

/// Configuration for a dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionConfig {
    /// Transport and target
    pub link: LinkConfig,
    /// Pause between connecting and writing
    pub settle_delay: Duration,
    /// Firmware protocol
    pub dialect: WireDialect,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            link: LinkConfig::default(),
            settle_delay: Duration::from_millis(SETTLE_DELAY_MS),
            dialect: WireDialect::Text,
        }
    }
}

impl ConnectionConfig {
    /// Load defaults overridden by `LAMP_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load defaults overridden by whatever `lookup` returns
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let kind: TransportKind = parse_var(&lookup, vars::TRANSPORT)?.unwrap_or_default();

        let address = || -> Result<Address> {
            Ok(parse_var(&lookup, vars::DEVICE_ADDR)?.unwrap_or_else(default_address))
        };

        let link = match kind {
            TransportKind::Spp => LinkConfig::Spp {
                address: address()?,
                profile_timeout: parse_var(&lookup, vars::PROFILE_TIMEOUT_MS)?
                    .map(Duration::from_millis)
                    .unwrap_or(DEFAULT_PROFILE_TIMEOUT),
            },
            TransportKind::Rfcomm => LinkConfig::Rfcomm {
                address: address()?,
                channel: parse_var(&lookup, vars::RFCOMM_CHANNEL)?
                    .unwrap_or(DEFAULT_RFCOMM_CHANNEL),
            },
            TransportKind::Serial => LinkConfig::Serial {
                path: lookup(vars::SERIAL_PORT).unwrap_or_else(|| DEFAULT_SERIAL_PORT.into()),
                baud: parse_var(&lookup, vars::BAUD)?.unwrap_or(DEFAULT_BAUD_RATE),
            },
            TransportKind::Tcp => LinkConfig::Tcp {
                address: lookup(vars::TCP_ADDR).unwrap_or_else(|| DEFAULT_TCP_ADDR.into()),
            },
        };

        let settle_delay = parse_var(&lookup, vars::SETTLE_MS)?
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(SETTLE_DELAY_MS));

        let dialect: WireDialect = parse_var(&lookup, vars::DIALECT)?.unwrap_or_default();

        Ok(Self {
            link,
            settle_delay,
            dialect,
        })
    }
}

fn default_address() -> Address {
    DEFAULT_DEVICE_ADDR.parse().unwrap_or(Address::any())
}

/// Parse an optional variable, naming it in the error
fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow!("Invalid {}={:?}: {}", key, raw, e)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<ConnectionConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConnectionConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = ConnectionConfig::default();
        assert_eq!(config.settle_delay, Duration::from_millis(300));
        assert_eq!(config.dialect, WireDialect::Text);
        assert_eq!(
            config.link,
            LinkConfig::Spp {
                address: Address::new([0x00, 0x06, 0x66, 0x46, 0x5B, 0xB2]),
                profile_timeout: DEFAULT_PROFILE_TIMEOUT,
            }
        );
    }

    #[test]
    fn test_empty_environment_matches_default() {
        assert_eq!(load(&[]).unwrap(), ConnectionConfig::default());
    }

    #[test]
    fn test_serial_overrides() {
        let config = load(&[
            (vars::TRANSPORT, "Serial"),
            (vars::SERIAL_PORT, "/dev/ttyUSB0"),
            (vars::BAUD, "9600"),
            (vars::SETTLE_MS, "50"),
        ])
        .unwrap();
        assert_eq!(
            config.link,
            LinkConfig::Serial {
                path: "/dev/ttyUSB0".into(),
                baud: 9600,
            }
        );
        assert_eq!(config.settle_delay, Duration::from_millis(50));
    }

    #[test]
    fn test_rfcomm_overrides() {
        let config = load(&[
            (vars::TRANSPORT, "rfcomm"),
            (vars::DEVICE_ADDR, "00:11:22:33:44:55"),
            (vars::RFCOMM_CHANNEL, "3"),
            (vars::DIALECT, "letter"),
        ])
        .unwrap();
        assert_eq!(config.link.kind(), TransportKind::Rfcomm);
        assert_eq!(
            config.link,
            LinkConfig::Rfcomm {
                address: Address::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]),
                channel: 3,
            }
        );
        assert_eq!(config.dialect, WireDialect::Letter);
    }

    #[test]
    fn test_tcp_default_address() {
        let config = load(&[(vars::TRANSPORT, "tcp")]).unwrap();
        assert_eq!(
            config.link,
            LinkConfig::Tcp {
                address: DEFAULT_TCP_ADDR.into()
            }
        );
    }

    #[test]
    fn test_malformed_values_rejected() {
        let err = load(&[(vars::TRANSPORT, "carrier-pigeon")]).unwrap_err();
        assert!(err.to_string().contains(vars::TRANSPORT));

        let err = load(&[(vars::DEVICE_ADDR, "not-a-mac")]).unwrap_err();
        assert!(err.to_string().contains(vars::DEVICE_ADDR));

        let err = load(&[(vars::SETTLE_MS, "-1")]).unwrap_err();
        assert!(err.to_string().contains(vars::SETTLE_MS));

        let err = load(&[(vars::DIALECT, "morse")]).unwrap_err();
        assert!(err.to_string().contains(vars::DIALECT));
        assert!(err.to_string().contains("unknown wire dialect: morse"));
    }
}
