//! `/start`: greeting and help listing.

use campus_core::{Command, CommandHelp, QueryCommand, QueryReply, QueryResult, RequestContext};

pub struct Start {
    app_name: String,
}

impl Start {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl QueryCommand for Start {
    fn command(&self) -> Command {
        Command::Start
    }

    /// Ignores any argument.
    fn execute(&self, _ctx: &RequestContext, _argument: Option<&str>) -> QueryResult<QueryReply> {
        Ok(QueryReply::Greeting {
            app_name: self.app_name.clone(),
            commands: Command::QUERIES.iter().copied().map(CommandHelp::for_command).collect(),
        })
    }
}
