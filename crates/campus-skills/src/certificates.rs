//! `/certificates <student_id>`: certificates held, in listed order.

use std::sync::Arc;

use campus_core::{Command, QueryCommand, QueryReply, QueryResult, RecordStore, RequestContext};

use crate::lookup;

pub struct CertificatesQuery {
    store: Arc<RecordStore>,
}

impl CertificatesQuery {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

impl QueryCommand for CertificatesQuery {
    fn command(&self) -> Command {
        Command::Certificates
    }

    fn execute(&self, _ctx: &RequestContext, argument: Option<&str>) -> QueryResult<QueryReply> {
        let student = lookup::student(&self.store, Command::Certificates, argument)?;
        Ok(QueryReply::Certificates {
            name: student.name.clone(),
            certificates: student.certificates.clone(),
        })
    }
}
