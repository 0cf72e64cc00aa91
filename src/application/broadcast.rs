//! Proactive alerts pushed to a fixed list of chats.
//!
//! Unlike the per-conversation monitor, the broadcast loop is started once at
//! boot and both rules run on every tick.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::notice;
use super::slot_check::SlotCheck;
use crate::domain::{CoefficientRecord, CoefficientRule, ConversationId, MonitorRule, WarehouseId};
use crate::port::{Messenger, SupplyApi};

pub struct BroadcastMonitor {
    supply: Arc<dyn SupplyApi>,
    messenger: Arc<dyn Messenger>,
    rule: MonitorRule,
    warehouse_ids: Vec<WarehouseId>,
    slot_check: SlotCheck,
    chats: Vec<ConversationId>,
    interval: Duration,
}

impl BroadcastMonitor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        supply: Arc<dyn SupplyApi>,
        messenger: Arc<dyn Messenger>,
        rule: MonitorRule,
        warehouse_ids: Vec<WarehouseId>,
        slot_check: SlotCheck,
        chats: Vec<ConversationId>,
        interval: Duration,
    ) -> Self {
        Self {
            supply,
            messenger,
            rule,
            warehouse_ids,
            slot_check,
            chats,
            interval,
        }
    }

    /// Collect matches from both rules. A failing rule is logged and
    /// contributes nothing. Slot check results are also filtered by the
    /// monitor rule.
    async fn collect(&self) -> Vec<CoefficientRecord> {
        let mut found = Vec::new();

        match self.supply.acceptance_coefficients(&self.warehouse_ids).await {
            Ok(records) => found.extend(self.rule.select(&records).into_iter().cloned()),
            Err(e) => error!(error = %e, "Broadcast coefficient fetch failed"),
        }

        // Window matches still have to pass the monitor rule
        match self.slot_check.run(self.supply.as_ref()).await {
            Ok(records) => found.extend(records.into_iter().filter(|r| self.rule.matches(r))),
            Err(e) => error!(error = %e, "Broadcast slot check failed"),
        }

        found
    }

    /// One tick: returns the number of messages delivered.
    pub async fn tick(&self) -> usize {
        let found = self.collect().await;
        debug!(matches = found.len(), chats = self.chats.len(), "Broadcast tick");

        let mut delivered = 0;
        for record in &found {
            let text = notice::coefficient_alert(record);
            for chat in &self.chats {
                match self.messenger.send_text(*chat, &text).await {
                    Ok(()) => delivered += 1,
                    Err(e) => warn!(chat = %chat, error = %e, "Broadcast delivery failed"),
                }
            }
        }
        delivered
    }

    /// Tick forever.
    pub async fn run(self) {
        info!(
            chats = self.chats.len(),
            interval_secs = self.interval.as_secs(),
            "Broadcast monitor started"
        );
        loop {
            self.tick().await;
            tokio::time::sleep(self.interval).await;
        }
    }
}
