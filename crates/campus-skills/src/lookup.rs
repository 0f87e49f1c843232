//! Shared argument check + student lookup for the record commands.

use campus_core::{require_argument, Command, QueryError, QueryResult, RecordStore, StudentRecord};

/// Resolves the student named by `argument`, or the usage / not-found error for `command`.
pub(crate) fn student<'a>(
    store: &'a RecordStore,
    command: Command,
    argument: Option<&str>,
) -> QueryResult<&'a StudentRecord> {
    let student_id = require_argument(command, argument)?;
    store.lookup(student_id).ok_or_else(|| QueryError::NotFound {
        command,
        key: student_id.to_string(),
    })
}

#[cfg(test)]
pub(crate) fn test_store() -> std::sync::Arc<RecordStore> {
    std::sync::Arc::new(RecordStore::embedded().expect("embedded dataset"))
}
