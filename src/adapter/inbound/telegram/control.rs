//! Telegram command execution against the application services.

use std::sync::Arc;

use tracing::{error, info};

use super::command::{command_help, TelegramCommand};
use crate::adapter::outbound::telegram::format;
use crate::application::{notice, BookingService, MonitorManager, SlotCheck};
use crate::domain::ConversationId;
use crate::error::Result;
use crate::port::{Messenger, SellerAnalyticsApi, SupplyApi};

/// Runs parsed commands and replies in the originating chat.
#[derive(Clone)]
pub struct TelegramControl {
    messenger: Arc<dyn Messenger>,
    supply: Arc<dyn SupplyApi>,
    analytics: Arc<dyn SellerAnalyticsApi>,
    monitors: Arc<MonitorManager>,
    booking: Arc<BookingService>,
    slot_check: SlotCheck,
}

impl TelegramControl {
    #[must_use]
    pub fn new(
        messenger: Arc<dyn Messenger>,
        supply: Arc<dyn SupplyApi>,
        analytics: Arc<dyn SellerAnalyticsApi>,
        monitors: Arc<MonitorManager>,
        booking: Arc<BookingService>,
        slot_check: SlotCheck,
    ) -> Self {
        Self {
            messenger,
            supply,
            analytics,
            monitors,
            booking,
            slot_check,
        }
    }

    /// Execute one command. Failures are reported to the chat, never
    /// returned.
    pub async fn execute(&self, chat: ConversationId, command: TelegramCommand) {
        info!(chat = %chat, command = ?command, "Executing Telegram command");

        if let Err(e) = self.run(chat, command).await {
            error!(chat = %chat, command = ?command, error = %e, "Command failed");
            let reply = format::render_failure(&e);
            if let Err(e) = self.messenger.send_text(chat, &reply).await {
                error!(chat = %chat, error = %e, "Failed to report command failure");
            }
        }
    }

    /// Reply with plain text.
    pub async fn reply(&self, chat: ConversationId, text: &str) -> Result<()> {
        self.messenger.send_text(chat, text).await
    }

    async fn run(&self, chat: ConversationId, command: TelegramCommand) -> Result<()> {
        match command {
            TelegramCommand::Start | TelegramCommand::Help => {
                self.reply(chat, command_help()).await
            }
            TelegramCommand::MonitorCoefficients => self.monitors.start(chat).await,
            TelegramCommand::CheckSlots => {
                self.reply(chat, "Отслеживание складов:").await?;
                let found = self.slot_check.run(self.supply.as_ref()).await?;
                self.reply(chat, &format::slot_check_report(&found)).await
            }
            TelegramCommand::HiddenProducts => {
                self.reply(chat, "Ваши скрытые карточки:").await?;
                let products = self.analytics.hidden_products().await?;
                self.reply(chat, &format::hidden_products_report(&products))
                    .await
            }
            TelegramCommand::SearchQueries => {
                self.reply(chat, "Поисковые запросы:").await?;
                let report = self.analytics.search_queries().await?;
                self.reply(chat, &format::json_report(&report)).await
            }
            TelegramCommand::KeywordStats => {
                self.reply(chat, "Статистика по ключевым фразам:").await?;
                let stats = self.analytics.keyword_stats().await?;
                self.reply(chat, &format::json_report(&stats)).await
            }
            TelegramCommand::SalesFunnel => {
                self.reply(chat, "Получаю воронку продаж... Пожалуйста, подождите.")
                    .await?;
                let funnel = self.analytics.sales_funnel().await?;
                for message in format::sales_funnel_messages(&funnel) {
                    self.messenger.send(chat, message).await?;
                }
                Ok(())
            }
            TelegramCommand::CreateReport => {
                self.reply(chat, "Создание отчета:").await?;
                let ticket = self.analytics.create_report().await?;
                self.reply(chat, &format::report_ticket(&ticket)).await
            }
            TelegramCommand::Adverts => {
                self.reply(chat, "Получаю рекламные кампании...").await?;
                let adverts = self.analytics.adverts().await?;
                self.reply(chat, &format::adverts_report(&adverts)).await
            }
            TelegramCommand::BookSlot => {
                self.reply(chat, notice::BOOKING_STARTED).await?;
                // Detached: runs until a slot is booked or the process exits
                drop(self.booking.spawn(chat));
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests;
