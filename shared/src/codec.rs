//! Transmission line codec
//!
//! Every command goes out as a single ASCII line:
//! ```text
//! <token>[ <args>];
//! ```
//! e.g. `off;`, `blink, 15;`, `on 1a2b3c;`. The lamp parses up to the `;`
//! terminator, so one write carries exactly one command.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use thiserror::Error;

use crate::color::Rgb;
use crate::command::{CommandError, LampCommand, LampRequest};

/// Terminates every text-dialect line
pub const LINE_TERMINATOR: char = ';';

/// Errors raised while reading codec settings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("unknown wire dialect: {0}")]
    UnknownDialect(String),
}

/// Which firmware protocol to speak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireDialect {
    /// Keyword protocol: `on;`, `timer, 1800;`
    #[default]
    Text,
    /// Single-letter protocol of the first firmware: `A`, `a`, `B`
    Letter,
}

impl fmt::Display for WireDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireDialect::Text => write!(f, "text"),
            WireDialect::Letter => write!(f, "letter"),
        }
    }
}

impl FromStr for WireDialect {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "letter" => Ok(Self::Letter),
            other => Err(CodecError::UnknownDialect(other.to_string())),
        }
    }
}

/// A fully formed line, ready to write to the lamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmissionLine(String);

impl TransmissionLine {
    /// Encode a request in the given dialect
    pub fn encode(request: &LampRequest, dialect: WireDialect) -> Result<Self, CommandError> {
        match dialect {
            WireDialect::Text => Ok(Self::text(request)),
            WireDialect::Letter => {
                // The letter firmware takes no arguments; they are dropped.
                let letter = request
                    .command
                    .letter()
                    .ok_or(CommandError::Unsupported {
                        command: request.command,
                        dialect,
                    })?;
                Ok(Self(letter.to_string()))
            }
        }
    }

    /// Encode a request in the keyword protocol
    pub fn text(request: &LampRequest) -> Self {
        let mut line = String::from(request.command.name());
        if let Some(args) = &request.args {
            if request.command.takes_duration() {
                line.push(',');
            }
            line.push(' ');
            line.push_str(args.as_str());
        }
        line.push(LINE_TERMINATOR);
        Self(line)
    }

    /// `on <rrggbb>;`
    pub fn color(rgb: Rgb) -> Self {
        Self(format!(
            "{} {}{}",
            LampCommand::On.name(),
            rgb.to_hex(),
            LINE_TERMINATOR
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Copy the line into a shareable byte buffer
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.0.as_bytes())
    }
}

impl fmt::Display for TransmissionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
