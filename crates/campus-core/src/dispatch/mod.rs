//! Command dispatch: maps a [`Command`] to its registered implementation.

mod command;
mod reply;

pub use command::{parse_command, Command, ParsedCommand, UnknownCommand};
pub use reply::{CommandHelp, QueryReply};

use std::sync::Arc;

use crate::error::{QueryError, QueryResult};
use crate::shared::RequestContext;

/// Implemented once per bot command.
pub trait QueryCommand: Send + Sync {
    /// Command this implementation answers.
    fn command(&self) -> Command;

    /// Runs the command against its store. `argument` is the raw token from the chat, if any.
    fn execute(&self, ctx: &RequestContext, argument: Option<&str>) -> QueryResult<QueryReply>;
}

/// Returns the argument, or a usage error naming `command` when it is absent or blank.
pub fn require_argument(command: Command, argument: Option<&str>) -> QueryResult<&str> {
    argument
        .and_then(|raw| raw.split_whitespace().next())
        .ok_or_else(|| QueryError::Usage {
            command,
            argument: command.argument_name().unwrap_or("argument"),
        })
}

/// Why a dispatch produced no reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("no implementation registered for /{0}")]
    Unregistered(Command),
}

/// Registry of command implementations, looked up by [`Command`].
pub struct CommandRegistry {
    commands: Vec<Arc<dyn QueryCommand>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Registers `implementation`, replacing any earlier one for the same command.
    pub fn register(&mut self, implementation: Arc<dyn QueryCommand>) {
        let command = implementation.command();
        self.commands.retain(|c| c.command() != command);
        self.commands.push(implementation);
    }

    pub fn get(&self, command: Command) -> Option<Arc<dyn QueryCommand>> {
        self.commands.iter().find(|c| c.command() == command).cloned()
    }

    /// Registered commands, in registration order.
    pub fn commands(&self) -> Vec<Command> {
        self.commands.iter().map(|c| c.command()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Routes parsed commands to the registry. Holds no mutable state.
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn dispatch(
        &self,
        ctx: &RequestContext,
        command: Command,
        argument: Option<&str>,
    ) -> Result<QueryReply, DispatchError> {
        let implementation = self
            .registry
            .get(command)
            .ok_or(DispatchError::Unregistered(command))?;
        let result = implementation.execute(ctx, argument);
        match &result {
            Ok(_) => tracing::info!(
                target: "campus::dispatch",
                correlation_id = %ctx.correlation_id,
                chat_id = ?ctx.chat_id,
                command = %command,
                "Command answered"
            ),
            Err(e) => tracing::info!(
                target: "campus::dispatch",
                correlation_id = %ctx.correlation_id,
                chat_id = ?ctx.chat_id,
                command = %command,
                outcome = %e,
                "Command rejected"
            ),
        }
        result.map_err(DispatchError::from)
    }

    /// Dispatches a [`ParsedCommand`].
    pub fn dispatch_parsed(
        &self,
        ctx: &RequestContext,
        parsed: &ParsedCommand,
    ) -> Result<QueryReply, DispatchError> {
        self.dispatch(ctx, parsed.command, parsed.argument.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo(Command);

    impl QueryCommand for Echo {
        fn command(&self) -> Command {
            self.0
        }

        fn execute(&self, _ctx: &RequestContext, argument: Option<&str>) -> QueryResult<QueryReply> {
            let key = require_argument(self.0, argument)?;
            Err(QueryError::NotFound {
                command: self.0,
                key: key.to_string(),
            })
        }
    }

    fn dispatcher() -> Dispatcher {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(Echo(Command::Hostel)));
        registry.register(Arc::new(Echo(Command::Verify)));
        Dispatcher::new(Arc::new(registry))
    }

    #[test]
    fn require_argument_rejects_absent_and_blank() {
        assert_eq!(
            require_argument(Command::Fees, None),
            Err(QueryError::Usage { command: Command::Fees, argument: "student_id" })
        );
        assert!(require_argument(Command::Verify, Some("   ")).is_err());
        assert_eq!(require_argument(Command::Verify, Some(" CERT-1 x")), Ok("CERT-1"));
    }

    #[test]
    fn usage_error_message_names_the_command() {
        let err = require_argument(Command::Verify, None).unwrap_err();
        assert_eq!(err.to_string(), "usage: /verify <certificate_id>");
    }

    #[test]
    fn dispatch_routes_to_registered_command() {
        let ctx = RequestContext::detached();
        let err = dispatcher().dispatch(&ctx, Command::Hostel, Some("999")).unwrap_err();
        assert_eq!(
            err,
            DispatchError::Query(QueryError::NotFound {
                command: Command::Hostel,
                key: "999".to_string()
            })
        );
    }

    #[test]
    fn dispatch_reports_unregistered_command() {
        let ctx = RequestContext::detached();
        let err = dispatcher().dispatch(&ctx, Command::Fees, Some("101")).unwrap_err();
        assert_eq!(err, DispatchError::Unregistered(Command::Fees));
    }

    #[test]
    fn register_replaces_existing_implementation() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(Echo(Command::Fees)));
        registry.register(Arc::new(Echo(Command::Hostel)));
        registry.register(Arc::new(Echo(Command::Fees)));
        assert_eq!(registry.commands(), vec![Command::Hostel, Command::Fees]);
    }
}
