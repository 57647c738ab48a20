//! Colour sender - forwards colour selections to an open serial link

use crate::command::Notifier;
use crate::transport::{PortOpener, TransportStream};
use anyhow::Result;
use lamp_shared::{Rgba, TransmissionLine};
use tracing::{debug, info, warn};

/// Owns the one serial connection and writes a line per colour change
pub struct ColorSender<O: PortOpener, N> {
    opener: O,
    notifier: N,
    port: String,
    conn: Option<O::Stream>,
    status: Option<String>,
}

impl<O, N> ColorSender<O, N>
where
    O: PortOpener,
    N: Notifier,
{
    /// Create a sender with no connection open yet
    pub fn new(opener: O, notifier: N, port: impl Into<String>) -> Self {
        Self {
            opener,
            notifier,
            port: port.into(),
            conn: None,
            status: None,
        }
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Current status message, if any
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// (Re)open the configured port
    pub async fn open(&mut self) -> bool {
        let port = self.port.clone();
        self.update_serial_port(&port).await
    }

    /// Switch to a new serial port.
    ///
    /// Any open connection is closed first. If the new port cannot be opened
    /// the failure goes to the status message and the sender is left with no
    /// connection.
    pub async fn update_serial_port(&mut self, path: &str) -> bool {
        self.status = None;
        self.close().await;
        self.port = path.to_string();

        match self.opener.open(path).await {
            Ok(stream) => {
                info!("[Color] Opened serial port {}", path);
                self.conn = Some(stream);
                true
            }
            Err(e) => {
                warn!("[Color] Failed to open {}: {:#}", path, e);
                self.set_status(format!("Unable to open serial port ({}).", path));
                false
            }
        }
    }

    /// Send the selected colour if a connection is open.
    ///
    /// Returns the line written, or `None` when nothing is connected.
    pub async fn update_color(&mut self, color: Rgba) -> Result<Option<TransmissionLine>> {
        let Some(conn) = self.conn.as_mut() else {
            debug!("[Color] No connection, skipping {:?}", color);
            return Ok(None);
        };

        let line = TransmissionLine::color(color.to_rgb());
        let written = conn.write_line(&line).await;
        if let Err(e) = written {
            // A dead link stays dead; drop it until the port is reopened.
            self.conn = None;
            self.set_status(format!("Unable to write to serial port ({}).", self.port));
            return Err(e.context(format!("Failed to send \"{}\"", line)));
        }

        debug!("[Color] Sent {}", line);
        Ok(Some(line))
    }

    /// Close the connection, if open
    pub async fn close(&mut self) {
        if let Some(mut conn) = self.conn.take() {
            if let Err(e) = TransportStream::shutdown(&mut conn).await {
                warn!("[Color] Error closing {}: {:#}", self.port, e);
            }
        }
    }

    fn set_status(&mut self, message: String) {
        self.notifier.notify(&message);
        self.status = Some(message);
    }
}
