//! Chat handler: turns one incoming chat message into at most one reply.
//!
//! The text is parsed as `/command [argument]`, dispatched against the shared
//! read-only stores, and the structured result rendered for Telegram. Plain
//! text, unknown commands and commands addressed to another bot get no reply.
//! Both transports (long polling and webhook) go through [`answer_text`].

use campus_core::{parse_command, DispatchError, Dispatcher, RequestContext};

use crate::render::{self, Reply};
use crate::telegram::{ReplySink, Update};

/// Reply for `text`, or `None` when the text is not a known command for this bot.
///
/// `bot_username` comes from `getMe`; while it is unknown every `@suffix` is accepted.
pub fn answer_text(
    dispatcher: &Dispatcher,
    bot_username: Option<&str>,
    ctx: &RequestContext,
    text: &str,
) -> Option<Reply> {
    let Some(parsed) = parse_command(text, bot_username) else {
        tracing::debug!(
            target: "campus::chat",
            correlation_id = %ctx.correlation_id,
            "Ignoring non-command message"
        );
        return None;
    };
    match dispatcher.dispatch_parsed(ctx, &parsed) {
        Ok(reply) => Some(render::query_reply(&reply)),
        Err(DispatchError::Query(e)) => Some(render::query_error(&e)),
        Err(e @ DispatchError::Unregistered(_)) => {
            tracing::warn!(
                target: "campus::chat",
                correlation_id = %ctx.correlation_id,
                error = %e,
                "Command has no implementation"
            );
            None
        }
    }
}

/// Answers a polled update through `sink`. Returns whether a reply was sent.
pub async fn process_update(
    dispatcher: &Dispatcher,
    bot_username: Option<&str>,
    sink: &dyn ReplySink,
    update: &Update,
) -> bool {
    let Some((chat_id, text)) = update.text_message() else {
        return false;
    };
    let ctx = RequestContext::for_chat(chat_id);
    tracing::debug!(
        target: "campus::chat",
        correlation_id = %ctx.correlation_id,
        update_id = update.update_id,
        message_id = update.any_message().map(|m| m.message_id),
        "Update received"
    );
    let Some(reply) = answer_text(dispatcher, bot_username, &ctx, text) else {
        return false;
    };
    match sink.send_reply(chat_id, &reply).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                target: "campus::chat",
                correlation_id = %ctx.correlation_id,
                update_id = update.update_id,
                chat_id,
                error = %e,
                "Failed to send reply"
            );
            false
        }
    }
}
