//! Command dispatcher - resolves a command and sends it to the lamp
//!
//! One dispatch is one short-lived link:
//! connect → settle delay → write one line → close.

use super::notify::Notifier;
use crate::connection::ConnectionConfig;
use crate::intent::LampIntent;
use crate::transport::{TransportConnector, TransportStream};
use lamp_shared::{CommandError, LampRequest, TransmissionLine, WireDialect};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Why a dispatch sent nothing (or could not finish sending)
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Unable to connect via {transport}: {reason}")]
    Connect {
        transport: &'static str,
        reason: String,
    },

    #[error("Unable to send \"{line}\": {reason}")]
    Write {
        line: TransmissionLine,
        reason: String,
    },
}

/// What a successful dispatch sent, and over which transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub line: TransmissionLine,
    pub transport: &'static str,
    pub target: String,
}

/// Sends single commands to the lamp
pub struct CommandDispatcher<C, N> {
    connector: C,
    notifier: N,
    settle_delay: Duration,
    dialect: WireDialect,
}

impl<C, N> CommandDispatcher<C, N>
where
    C: TransportConnector,
    N: Notifier,
{
    /// Create a new command dispatcher
    pub fn new(connector: C, notifier: N, config: &ConnectionConfig) -> Self {
        Self {
            connector,
            notifier,
            settle_delay: config.settle_delay,
            dialect: config.dialect,
        }
    }

    /// Turn raw inputs into the line to send, notifying the user on failure
    pub fn resolve(&self, intent: &LampIntent) -> Result<TransmissionLine, DispatchError> {
        if intent.command.is_none() {
            self.notifier.notify("No lamp_cmd set.");
        }

        let encoded = LampRequest::resolve(intent.command.as_deref(), intent.args.as_deref())
            .and_then(|request| TransmissionLine::encode(&request, self.dialect));

        encoded.map_err(|e| {
            warn!("Rejected command: {}", e);
            self.notifier.notify(&e.to_string());
            DispatchError::from(e)
        })
    }

    /// Resolve and transmit one command
    pub async fn dispatch(&self, intent: &LampIntent) -> Result<DispatchReport, DispatchError> {
        let line = self.resolve(intent)?;
        self.transmit(line).await
    }

    /// Connect, settle, write `line`, close
    pub async fn transmit(&self, line: TransmissionLine) -> Result<DispatchReport, DispatchError> {
        let transport = self.connector.name();
        let target = self.connector.target();

        info!("Connecting to {} via {}", target, transport);
        let mut stream = match self.connector.connect().await {
            Ok(stream) => stream,
            Err(e) => {
                error!("Connection to {} failed: {:#}", target, e);
                self.notifier.notify("Unable to connect.");
                return Err(DispatchError::Connect {
                    transport,
                    reason: format!("{:#}", e),
                });
            }
        };

        if !self.settle_delay.is_zero() {
            debug!("Waiting {:?} for the link to settle", self.settle_delay);
            tokio::time::sleep(self.settle_delay).await;
        }

        let written = stream.write_line(&line).await;

        // Close regardless of how the write went.
        if let Err(e) = TransportStream::shutdown(&mut stream).await {
            warn!("Failed to close link to {}: {:#}", target, e);
        }

        match written {
            Ok(()) => {
                info!("Sent {:?} to {}", line.as_str(), target);
                self.notifier.notify(&format!("Sent \"{}\" command.", line));
                Ok(DispatchReport {
                    line,
                    transport,
                    target,
                })
            }
            Err(e) => {
                error!("Write to {} failed: {:#}", target, e);
                self.notifier.notify(&format!("Unable to send \"{}\".", line));
                Err(DispatchError::Write {
                    line,
                    reason: format!("{:#}", e),
                })
            }
        }
    }
}
