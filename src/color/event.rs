//! Line-oriented events that drive the colour sender

use anyhow::{anyhow, Result};
use lamp_shared::Rgba;
use std::str::FromStr;

/// One user action
#[derive(Debug, Clone, PartialEq)]
pub enum ColorEvent {
    /// The port path was edited
    Port(String),
    /// A new colour was picked
    Color(Rgba),
    Quit,
}

impl FromStr for ColorEvent {
    type Err = anyhow::Error;

    /// `port <path>`, `color <rgb>` or `quit`
    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim()))
            .unwrap_or((line, ""));

        match verb.to_lowercase().as_str() {
            "port" if !rest.is_empty() => Ok(Self::Port(rest.to_string())),
            "port" => Err(anyhow!("port needs a device path")),
            "color" | "colour" => Ok(Self::Color(rest.parse()?)),
            "quit" | "exit" => Ok(Self::Quit),
            "" => Err(anyhow!("empty event")),
            other => Err(anyhow!("unknown event: {}", other)),
        }
    }
}
