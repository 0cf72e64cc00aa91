//! Long-polling command listener.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{info, warn};

use super::auth::{dispatch_for_message, Dispatch};
use super::command::bot_commands;
use super::control::TelegramControl;
use crate::domain::ConversationId;

/// Receive updates until the dispatcher stops (Ctrl-C or a fatal error).
///
/// Each command runs in its own task so a slow handler never blocks the
/// update stream. `bot_username` is this bot's own name; group commands
/// addressed to other bots are ignored.
pub async fn run_command_listener(
    bot: Bot,
    control: TelegramControl,
    allowed_chats: Vec<i64>,
    bot_username: Option<String>,
) {
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    let allowed_chats = Arc::new(allowed_chats);
    let bot_username = Arc::new(bot_username);
    info!(
        restricted = !allowed_chats.is_empty(),
        "Telegram command listener started"
    );

    teloxide::repl(bot, move |msg: Message| {
        let control = control.clone();
        let allowed_chats = Arc::clone(&allowed_chats);
        let bot_username = Arc::clone(&bot_username);
        async move {
            let Some(text) = msg.text() else {
                return respond(());
            };
            let chat = ConversationId::new(msg.chat.id.0);

            match dispatch_for_message(text, chat, &allowed_chats, bot_username.as_deref()) {
                Dispatch::Ignore => {}
                Dispatch::Execute(command) => {
                    tokio::spawn(async move { control.execute(chat, command).await });
                }
                Dispatch::Reject(reply) => {
                    if let Err(e) = control.reply(chat, &reply).await {
                        warn!(chat = %chat, error = %e, "Failed to send command error");
                    }
                }
            }

            respond(())
        }
    })
    .await;

    info!("Telegram command listener stopped");
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
