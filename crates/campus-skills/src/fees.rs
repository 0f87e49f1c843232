//! `/fees <student_id>`: fee account totals.

use std::sync::Arc;

use campus_core::{Command, QueryCommand, QueryReply, QueryResult, RecordStore, RequestContext};

use crate::lookup;

pub struct FeesQuery {
    store: Arc<RecordStore>,
}

impl FeesQuery {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

impl QueryCommand for FeesQuery {
    fn command(&self) -> Command {
        Command::Fees
    }

    fn execute(&self, _ctx: &RequestContext, argument: Option<&str>) -> QueryResult<QueryReply> {
        let student = lookup::student(&self.store, Command::Fees, argument)?;
        Ok(QueryReply::Fees {
            name: student.name.clone(),
            fees: student.fees,
        })
    }
}
