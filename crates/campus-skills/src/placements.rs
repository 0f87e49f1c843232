//! `/placements <student_id>`

use std::sync::Arc;

use campus_core::{Command, QueryCommand, QueryReply, QueryResult, RecordStore, RequestContext};

use crate::lookup;

pub struct PlacementsQuery {
    store: Arc<RecordStore>,
}

impl PlacementsQuery {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

impl QueryCommand for PlacementsQuery {
    fn command(&self) -> Command {
        Command::Placements
    }

    fn execute(&self, _ctx: &RequestContext, argument: Option<&str>) -> QueryResult<QueryReply> {
        let student = lookup::student(&self.store, Command::Placements, argument)?;
        Ok(QueryReply::Placements {
            name: student.name.clone(),
            placement: student.placement.clone(),
        })
    }
}
