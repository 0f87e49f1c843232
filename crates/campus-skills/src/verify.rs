//! `/verify <certificate_id>`: ledger fingerprint lookup.

use std::sync::Arc;

use campus_core::{
    require_argument, Command, LedgerIndex, QueryCommand, QueryError, QueryReply, QueryResult, RequestContext,
};

pub struct VerifyCertificate {
    ledger: Arc<LedgerIndex>,
}

impl VerifyCertificate {
    pub fn new(ledger: Arc<LedgerIndex>) -> Self {
        Self { ledger }
    }
}

impl QueryCommand for VerifyCertificate {
    fn command(&self) -> Command {
        Command::Verify
    }

    fn execute(&self, _ctx: &RequestContext, argument: Option<&str>) -> QueryResult<QueryReply> {
        let cert_id = require_argument(Command::Verify, argument)?;
        let entry = self.ledger.verify(cert_id).ok_or_else(|| QueryError::NotFound {
            command: Command::Verify,
            key: cert_id.to_string(),
        })?;
        Ok(QueryReply::Verified {
            entry: entry.clone(),
        })
    }
}
