//! Lamp command table
//!
//! The lamp firmware understands a small, fixed set of keywords. Each one also
//! has a numeric alias from the first generation of the control scripts, which
//! automation profiles still send.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::codec::WireDialect;

/// Errors raised while resolving a command identifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Received invalid command: {0}.")]
    Invalid(String),

    #[error("Command {command} cannot be sent in the {dialect} dialect")]
    Unsupported {
        command: LampCommand,
        dialect: WireDialect,
    },
}

/// A command the lamp understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LampCommand {
    On,
    Off,
    Blink,
    Mood,
    Timer,
}

impl LampCommand {
    /// Every command, in legacy code order
    pub const ALL: [LampCommand; 5] = [
        LampCommand::On,
        LampCommand::Off,
        LampCommand::Blink,
        LampCommand::Mood,
        LampCommand::Timer,
    ];

    /// Command used when no identifier was supplied at all
    pub const FAIL_SAFE: LampCommand = LampCommand::Off;

    /// Look up a command by its legacy numeric alias (1..=5)
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::On),
            2 => Some(Self::Off),
            3 => Some(Self::Blink),
            4 => Some(Self::Mood),
            5 => Some(Self::Timer),
            _ => None,
        }
    }

    /// Legacy numeric alias
    pub fn code(self) -> u32 {
        match self {
            Self::On => 1,
            Self::Off => 2,
            Self::Blink => 3,
            Self::Mood => 4,
            Self::Timer => 5,
        }
    }

    /// Keyword sent on the wire
    pub fn name(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Blink => "blink",
            Self::Mood => "mood",
            Self::Timer => "timer",
        }
    }

    /// Whether the command's argument is a duration in seconds.
    ///
    /// These render as `blink, <seconds>` rather than `blink <seconds>`.
    pub fn takes_duration(self) -> bool {
        matches!(self, Self::Blink | Self::Timer)
    }

    /// Single-letter code used by the first firmware, if it had one
    pub fn letter(self) -> Option<char> {
        match self {
            Self::On => Some('A'),
            Self::Off => Some('a'),
            Self::Timer => Some('B'),
            Self::Blink | Self::Mood => None,
        }
    }
}

impl fmt::Display for LampCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LampCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ident = s.trim().to_lowercase();

        // Codes match their exact decimal spelling only, so "+3" and "03" are rejected
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.name() == ident || cmd.code().to_string() == ident)
            .ok_or(CommandError::Invalid(ident))
    }
}

/// Free-text argument appended to a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArgs(String);

impl CommandArgs {
    /// Wrap an argument; blank input counts as no argument
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved command plus its optional argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LampRequest {
    pub command: LampCommand,
    pub args: Option<CommandArgs>,
}

impl LampRequest {
    pub fn new(command: LampCommand, args: Option<CommandArgs>) -> Self {
        Self { command, args }
    }

    /// Resolve raw invocation inputs.
    ///
    /// A missing identifier falls back to [`LampCommand::FAIL_SAFE`]; an
    /// identifier that is present but unknown is an error.
    pub fn resolve(command: Option<&str>, args: Option<&str>) -> Result<Self, CommandError> {
        let command = match command {
            Some(ident) => ident.parse()?,
            None => LampCommand::FAIL_SAFE,
        };
        Ok(Self::new(command, args.and_then(CommandArgs::new)))
    }
}
