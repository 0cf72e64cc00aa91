//! Telegram bot configuration.

use serde::Deserialize;

/// Telegram bot configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramAppConfig {
    /// Bot token loaded from `TELEGRAM_BOT_TOKEN` at runtime.
    #[serde(skip)]
    pub bot_token: Option<String>,
    /// Chats allowed to issue commands. Empty means every chat.
    #[serde(default)]
    pub allowed_chat_ids: Vec<i64>,
}
