//! App orchestration.
//!
//! Builds the adapters and services from configuration, then runs the
//! Telegram command listener until it stops.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::{info, warn};

use crate::adapter::inbound::telegram::{run_command_listener, TelegramControl};
use crate::adapter::outbound::browser::ScriptBooker;
use crate::adapter::outbound::telegram::TelegramMessenger;
use crate::adapter::outbound::wildberries::WildberriesClient;
use crate::application::{BookingService, BroadcastMonitor, MonitorManager, SlotCheck};
use crate::domain::ConversationId;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{Messenger, SellerAnalyticsApi, SupplyApi};

/// Main application struct.
pub struct App;

impl App {
    /// Run one service lifetime.
    ///
    /// # Errors
    ///
    /// Fails when the bot token is missing or Telegram rejects it. Errors
    /// inside command handlers and background loops never surface here.
    pub async fn run(config: &Config) -> Result<()> {
        let bot = Bot::new(config.bot_token()?);
        let me = bot.get_me().await?;
        info!(username = ?me.user.username, "Connected to Telegram");

        let missing = config.api.keys.missing();
        if !missing.is_empty() {
            warn!(?missing, "Marketplace API keys not set, those commands will fail");
        }

        let client = Arc::new(WildberriesClient::new(
            config.api.clone(),
            config.reports.clone(),
        ));
        let supply: Arc<dyn SupplyApi> = client.clone();
        let analytics: Arc<dyn SellerAnalyticsApi> = client;
        let messenger: Arc<dyn Messenger> = Arc::new(TelegramMessenger::new(bot.clone()));

        let monitors = Arc::new(MonitorManager::new(
            Arc::clone(&supply),
            Arc::clone(&messenger),
            config.monitor.clone(),
        ));
        let booking = Arc::new(BookingService::new(
            Arc::new(ScriptBooker::from_config(&config.booking)),
            Arc::clone(&messenger),
            config.booking.retry_delay(),
        ));
        let slot_check = SlotCheck::from_config(&config.slot_check);

        let broadcast = spawn_broadcast(config, &supply, &messenger, &slot_check);

        let control = TelegramControl::new(
            Arc::clone(&messenger),
            Arc::clone(&supply),
            analytics,
            Arc::clone(&monitors),
            booking,
            slot_check,
        );

        run_command_listener(
            bot,
            control,
            config.telegram.allowed_chat_ids.clone(),
            me.user.username.clone(),
        )
        .await;

        monitors.shutdown();
        if let Some(handle) = broadcast {
            handle.abort();
        }
        info!("Service stopped");
        Ok(())
    }
}

fn spawn_broadcast(
    config: &Config,
    supply: &Arc<dyn SupplyApi>,
    messenger: &Arc<dyn Messenger>,
    slot_check: &SlotCheck,
) -> Option<tokio::task::JoinHandle<()>> {
    let settings = &config.broadcast;
    if !settings.enabled {
        return None;
    }
    if settings.chat_ids.is_empty() {
        warn!("Broadcast enabled without chat ids, not starting");
        return None;
    }

    let monitor = BroadcastMonitor::new(
        Arc::clone(supply),
        Arc::clone(messenger),
        config.monitor.rule(),
        config.monitor.warehouse_ids(),
        slot_check.clone(),
        settings.chat_ids.iter().copied().map(ConversationId::new).collect(),
        settings.interval(),
    );
    Some(tokio::spawn(monitor.run()))
}
