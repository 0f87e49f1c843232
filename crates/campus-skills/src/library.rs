//! `/library <student_id>`: issued books and outstanding fine.

use std::sync::Arc;

use campus_core::{Command, QueryCommand, QueryReply, QueryResult, RecordStore, RequestContext};

use crate::lookup;

pub struct LibraryQuery {
    store: Arc<RecordStore>,
}

impl LibraryQuery {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

impl QueryCommand for LibraryQuery {
    fn command(&self) -> Command {
        Command::Library
    }

    fn execute(&self, _ctx: &RequestContext, argument: Option<&str>) -> QueryResult<QueryReply> {
        let student = lookup::student(&self.store, Command::Library, argument)?;
        Ok(QueryReply::Library {
            name: student.name.clone(),
            books_issued: student.library.books_issued.clone(),
            fine: student.library.fine,
        })
    }
}
