//! `/attendance <student_id>`

use std::sync::Arc;

use campus_core::{Command, QueryCommand, QueryReply, QueryResult, RecordStore, RequestContext};

use crate::lookup;

pub struct AttendanceQuery {
    store: Arc<RecordStore>,
}

impl AttendanceQuery {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

impl QueryCommand for AttendanceQuery {
    fn command(&self) -> Command {
        Command::Attendance
    }

    fn execute(&self, _ctx: &RequestContext, argument: Option<&str>) -> QueryResult<QueryReply> {
        let student = lookup::student(&self.store, Command::Attendance, argument)?;
        let attendance = &student.attendance;
        Ok(QueryReply::Attendance {
            name: student.name.clone(),
            classes_held: attendance.classes_held,
            attended: attendance.attended,
            percentage: attendance.percentage(),
        })
    }
}
