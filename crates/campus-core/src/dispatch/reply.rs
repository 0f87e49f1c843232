//! Structured command results. Presentation is left to the transport.

use serde::Serialize;

use super::Command;
use crate::ledger::LedgerEntry;
use crate::records::{Certificate, Fees, Hostel, Placement};

/// One entry of the help listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandHelp {
    pub command: Command,
    pub argument: Option<&'static str>,
}

impl CommandHelp {
    pub fn for_command(command: Command) -> Self {
        Self {
            command,
            argument: command.argument_name(),
        }
    }
}

/// Successful result of a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryReply {
    Greeting {
        app_name: String,
        commands: Vec<CommandHelp>,
    },
    Fees {
        name: String,
        fees: Fees,
    },
    Attendance {
        name: String,
        classes_held: u32,
        attended: u32,
        percentage: f64,
    },
    Hostel {
        name: String,
        hostel: Hostel,
    },
    Library {
        name: String,
        books_issued: Vec<String>,
        fine: u64,
    },
    Placements {
        name: String,
        placement: Placement,
    },
    Certificates {
        name: String,
        certificates: Vec<Certificate>,
    },
    Verified {
        entry: LedgerEntry,
    },
}

impl QueryReply {
    /// Command that produced this reply.
    pub fn command(&self) -> Command {
        match self {
            QueryReply::Greeting { .. } => Command::Start,
            QueryReply::Fees { .. } => Command::Fees,
            QueryReply::Attendance { .. } => Command::Attendance,
            QueryReply::Hostel { .. } => Command::Hostel,
            QueryReply::Library { .. } => Command::Library,
            QueryReply::Placements { .. } => Command::Placements,
            QueryReply::Certificates { .. } => Command::Certificates,
            QueryReply::Verified { .. } => Command::Verify,
        }
    }
}
