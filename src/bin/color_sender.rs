//! Interactive colour sender
//!
//! Reads one event per line from stdin:
//! ```text
//! port /dev/rfcomm1
//! color #ff0080
//! color 1.0, 0.0, 0.5
//! quit
//! ```

use anyhow::{Context, Result};
use lamp_control::color::{ColorEvent, ColorSender};
use lamp_control::command::ConsoleNotifier;
use lamp_control::connection::vars;
use lamp_control::transport::SerialPortOpener;
use lamp_shared::link::{DEFAULT_BAUD_RATE, DEFAULT_SERIAL_PORT};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    lamp_control::init_tracing();

    let port = std::env::var(vars::SERIAL_PORT).unwrap_or_else(|_| DEFAULT_SERIAL_PORT.into());
    let baud = match std::env::var(vars::BAUD) {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .with_context(|| format!("Invalid {}={:?}", vars::BAUD, raw))?,
        Err(_) => DEFAULT_BAUD_RATE,
    };

    info!("Colour sender starting on {} at {} baud", port, baud);
    let mut sender = ColorSender::new(SerialPortOpener::new(baud), ConsoleNotifier, port);
    sender.open().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let event = match line.parse::<ColorEvent>() {
            Ok(event) => event,
            Err(e) => {
                warn!("Ignoring {:?}: {:#}", line, e);
                continue;
            }
        };

        match event {
            ColorEvent::Port(path) => {
                sender.update_serial_port(&path).await;
            }
            ColorEvent::Color(color) => {
                if let Err(e) = sender.update_color(color).await {
                    error!("{:#}", e);
                }
            }
            ColorEvent::Quit => break,
        }
    }

    sender.close().await;
    Ok(())
}
