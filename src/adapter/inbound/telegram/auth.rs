//! Authorization and routing for inbound Telegram messages.

use tracing::warn;

use super::command::{command_help, parse_command, CommandParseError, TelegramCommand};
use crate::domain::ConversationId;

/// What to do with an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Unauthorized chat or plain text.
    Ignore,
    Execute(TelegramCommand),
    /// Reply with this text and do nothing else.
    Reject(String),
}

/// Decide how to handle a message from `incoming`.
///
/// An empty `allowed` list admits every chat. Commands addressed to another
/// bot are ignored once `bot_username` is known.
pub fn dispatch_for_message(
    text: &str,
    incoming: ConversationId,
    allowed: &[i64],
    bot_username: Option<&str>,
) -> Dispatch {
    if !is_authorized_chat(incoming, allowed) {
        return Dispatch::Ignore;
    }

    match parse_command(text, bot_username) {
        Ok(command) => Dispatch::Execute(command),
        Err(CommandParseError::NotACommand | CommandParseError::OtherBot(_)) => Dispatch::Ignore,
        Err(err) => Dispatch::Reject(format!("Ошибка: {err}\n\n{}", command_help())),
    }
}

fn is_authorized_chat(incoming: ConversationId, allowed: &[i64]) -> bool {
    if allowed.is_empty() || allowed.contains(&incoming.get()) {
        return true;
    }

    warn!(
        chat_id = incoming.get(),
        "Ignoring Telegram message from unauthorized chat"
    );
    false
}
