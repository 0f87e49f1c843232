//! campus-core: shared config, the read-only student record store, the mock
//! certificate ledger, and command dispatch.
//!
//! Both stores are built once at startup and shared read-only; every command is
//! a single lookup.

mod dispatch;
mod error;
mod ledger;
mod records;
mod shared;

pub use shared::{CoreConfig, RequestContext, TransportMode, DEFAULT_CONFIG_PATH, TOKEN_ENV};

pub use error::{ConfigurationError, QueryError, QueryResult};

pub use records::{Attendance, Certificate, Fees, Hostel, Library, Placement, RecordStore, StudentRecord};

pub use ledger::{certificate_digest, LedgerEntry, LedgerIndex, REFERENCE_PREFIX_LEN};

pub use dispatch::{
    parse_command, require_argument, Command, CommandHelp, CommandRegistry, DispatchError, Dispatcher,
    ParsedCommand, QueryCommand, QueryReply, UnknownCommand,
};
