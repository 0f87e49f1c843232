//! Command names and text parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed set of bot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Greeting and help listing.
    #[serde(alias = "help")]
    Start,
    Fees,
    Attendance,
    Hostel,
    Library,
    Placements,
    Certificates,
    /// Certificate lookup in the ledger index.
    Verify,
}

impl Command {
    /// The seven lookup commands, in help-listing order.
    pub const QUERIES: [Command; 7] = [
        Command::Fees,
        Command::Attendance,
        Command::Hostel,
        Command::Library,
        Command::Placements,
        Command::Certificates,
        Command::Verify,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Fees => "fees",
            Command::Attendance => "attendance",
            Command::Hostel => "hostel",
            Command::Library => "library",
            Command::Placements => "placements",
            Command::Certificates => "certificates",
            Command::Verify => "verify",
        }
    }

    /// Name of the argument the command expects, `None` for `start`.
    pub fn argument_name(&self) -> Option<&'static str> {
        match self {
            Command::Start => None,
            Command::Verify => Some("certificate_id"),
            _ => Some("student_id"),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command: {0}")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    /// Case-insensitive; `help` is accepted for `start`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "start" | "help" => Ok(Command::Start),
            "fees" => Ok(Command::Fees),
            "attendance" => Ok(Command::Attendance),
            "hostel" => Ok(Command::Hostel),
            "library" => Ok(Command::Library),
            "placements" => Ok(Command::Placements),
            "certificates" => Ok(Command::Certificates),
            "verify" => Ok(Command::Verify),
            _ => Err(UnknownCommand(s.to_string())),
        }
    }
}

/// A recognised command line: `/name[@bot] [argument] ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub command: Command,
    /// First whitespace-delimited token after the command.
    pub argument: Option<String>,
}

/// Parses chat text into a command. Plain text and unknown commands yield `None`.
///
/// Group chats address commands as `/fees@SomeBot`. When `bot_username` is known,
/// a suffix naming any other bot yields `None`; usernames compare case-insensitively.
pub fn parse_command(text: &str, bot_username: Option<&str>) -> Option<ParsedCommand> {
    let mut tokens = text.split_whitespace();
    let head = tokens.next()?.strip_prefix('/')?;
    let name = match head.split_once('@') {
        Some((name, addressed)) => {
            if let Some(me) = bot_username {
                if !addressed.eq_ignore_ascii_case(me.trim_start_matches('@')) {
                    return None;
                }
            }
            name
        }
        None => head,
    };
    let command = name.parse::<Command>().ok()?;
    Some(ParsedCommand {
        command,
        argument: tokens.next().map(str::to_string),
    })
}
