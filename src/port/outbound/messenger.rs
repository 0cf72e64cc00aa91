//! Messenger port for outbound chat messages.

use async_trait::async_trait;

use crate::domain::ConversationId;
use crate::error::Result;

/// How the transport should interpret message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    #[default]
    Plain,
    /// Telegram `MarkdownV2`; reserved characters must already be escaped.
    MarkdownV2,
}

/// A message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub text: String,
    pub format: TextFormat,
}

impl OutboundMessage {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Plain,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::MarkdownV2,
        }
    }
}

impl From<String> for OutboundMessage {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

impl From<&str> for OutboundMessage {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

/// Delivers messages to a conversation.
///
/// Implementations split text that exceeds the transport limit; callers may
/// pass arbitrarily long text.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, conversation: ConversationId, message: OutboundMessage) -> Result<()>;

    /// Convenience wrapper for plain text.
    async fn send_text(&self, conversation: ConversationId, text: &str) -> Result<()> {
        self.send(conversation, OutboundMessage::plain(text)).await
    }
}
