use thiserror::Error;

use crate::dispatch::Command;

/// Per-request rejection returned by a query command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The command needs an argument and none was given.
    #[error("usage: /{} <{argument}>", .command.as_str())]
    Usage {
        command: Command,
        argument: &'static str,
    },

    /// The lookup key has no entry in the store or ledger.
    #[error("{} not found: {key}", .command.argument_name().unwrap_or("key"))]
    NotFound { command: Command, key: String },
}

/// Malformed student dataset. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("dataset I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dataset is not a JSON object of student records: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("student {student_id}: invalid record: {source}")]
    InvalidRecord {
        student_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("dataset contains an empty student id")]
    EmptyStudentId,

    #[error("student {student_id}: paid ({paid}) + due ({due}) != total ({total})")]
    FeesMismatch {
        student_id: String,
        total: u64,
        paid: u64,
        due: u64,
    },

    #[error("student {student_id}: attended ({attended}) exceeds classes held ({classes_held})")]
    AttendanceExceedsHeld {
        student_id: String,
        classes_held: u32,
        attended: u32,
    },

    #[error("certificate {cert_id} is listed by both {first_owner} and {second_owner}")]
    DuplicateCertificate {
        cert_id: String,
        first_owner: String,
        second_owner: String,
    },
}

pub type QueryResult<T> = Result<T, QueryError>;
