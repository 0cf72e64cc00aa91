//! [`Messenger`] implementation backed by the Telegram Bot API.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::{debug, error};

use super::format::{split_chunks, MESSAGE_LIMIT};
use crate::domain::ConversationId;
use crate::error::Result;
use crate::port::{Messenger, OutboundMessage, TextFormat};

/// Sends messages through a shared [`Bot`], splitting long text into
/// several messages.
#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, conversation: ConversationId, message: OutboundMessage) -> Result<()> {
        let chat_id = ChatId(conversation.get());
        let chunks = split_chunks(&message.text, MESSAGE_LIMIT);
        debug!(chat_id = chat_id.0, chunks = chunks.len(), "Sending Telegram message");

        for chunk in chunks {
            let request = self.bot.send_message(chat_id, chunk);
            let request = match message.format {
                TextFormat::Plain => request,
                TextFormat::MarkdownV2 => request.parse_mode(ParseMode::MarkdownV2),
            };
            if let Err(e) = request.await {
                error!(chat_id = chat_id.0, error = %e, "Failed to send Telegram message");
                return Err(e.into());
            }
        }
        Ok(())
    }
}
