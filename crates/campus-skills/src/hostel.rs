//! `/hostel <student_id>`

use std::sync::Arc;

use campus_core::{Command, QueryCommand, QueryReply, QueryResult, RecordStore, RequestContext};

use crate::lookup;

pub struct HostelQuery {
    store: Arc<RecordStore>,
}

impl HostelQuery {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

impl QueryCommand for HostelQuery {
    fn command(&self) -> Command {
        Command::Hostel
    }

    fn execute(&self, _ctx: &RequestContext, argument: Option<&str>) -> QueryResult<QueryReply> {
        let student = lookup::student(&self.store, Command::Hostel, argument)?;
        Ok(QueryReply::Hostel {
            name: student.name.clone(),
            hostel: student.hostel.clone(),
        })
    }
}
