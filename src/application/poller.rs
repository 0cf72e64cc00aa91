//! Periodic acceptance-coefficient poller.
//!
//! One poller serves one conversation. It has no exit path of its own: the
//! loop runs until its task is aborted, which takes effect at the next await
//! point (the fetch, a send, or the sleep).

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use super::notice;
use crate::domain::{CoefficientRule, ConversationId, MonitorRule, WarehouseId};
use crate::error::Result;
use crate::port::{Messenger, SupplyApi};

/// Fetch → filter → notify → sleep, forever.
pub struct CoefficientPoller {
    supply: Arc<dyn SupplyApi>,
    messenger: Arc<dyn Messenger>,
    rule: MonitorRule,
    warehouse_ids: Vec<WarehouseId>,
    interval: Duration,
    error_backoff: Duration,
}

impl CoefficientPoller {
    pub fn new(
        supply: Arc<dyn SupplyApi>,
        messenger: Arc<dyn Messenger>,
        rule: MonitorRule,
        warehouse_ids: Vec<WarehouseId>,
        interval: Duration,
        error_backoff: Duration,
    ) -> Self {
        Self {
            supply,
            messenger,
            rule,
            warehouse_ids,
            interval,
            error_backoff,
        }
    }

    /// Run one cycle and return the number of notifications sent.
    ///
    /// # Errors
    ///
    /// Returns the first fetch or delivery error; records after a failed
    /// delivery are not sent in this cycle.
    pub async fn poll_once(&self, conversation: ConversationId) -> Result<usize> {
        let records = self
            .supply
            .acceptance_coefficients(&self.warehouse_ids)
            .await?;

        let matches = self.rule.select(&records);
        debug!(
            conversation = %conversation,
            fetched = records.len(),
            matched = matches.len(),
            "Poll cycle complete"
        );

        for record in &matches {
            let text = notice::coefficient_alert(record);
            self.messenger.send_text(conversation, &text).await?;
            info!(
                conversation = %conversation,
                warehouse_id = %record.warehouse_id,
                coefficient = %record.coefficient,
                "Slot notification sent"
            );
        }

        Ok(matches.len())
    }

    /// Poll until cancelled.
    pub async fn run(self, conversation: ConversationId) {
        info!(
            conversation = %conversation,
            warehouses = ?self.warehouse_ids,
            interval_secs = self.interval.as_secs(),
            "Coefficient monitor started"
        );

        loop {
            let delay = match self.poll_once(conversation).await {
                Ok(_) => self.interval,
                Err(e) => {
                    error!(
                        conversation = %conversation,
                        error = %e,
                        backoff_secs = self.error_backoff.as_secs(),
                        "Periodic coefficient check failed"
                    );
                    self.error_backoff
                }
            };
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::testkit::domain::coefficient;
    use crate::testkit::marketplace::FakeSupply;
    use crate::testkit::messenger::RecordingMessenger;
    use rust_decimal_macros::dec;

    const CHAT: ConversationId = ConversationId::new(42);

    fn poller(supply: Arc<FakeSupply>, messenger: Arc<RecordingMessenger>) -> CoefficientPoller {
        CoefficientPoller::new(
            supply,
            messenger,
            MonitorRule::new(WarehouseId::new(206348), dec!(3), "Короба"),
            vec![WarehouseId::new(206348), WarehouseId::new(158311)],
            Duration::from_secs(12),
            Duration::from_secs(30),
        )
    }

    #[tokio::test]
    async fn matching_record_produces_one_notification() {
        let supply = Arc::new(FakeSupply::with_records(vec![coefficient(
            206348,
            dec!(2.5),
            "Короба",
        )]));
        let messenger = Arc::new(RecordingMessenger::new());

        let sent = poller(supply, messenger.clone()).poll_once(CHAT).await.unwrap();

        assert_eq!(sent, 1);
        let texts = messenger.texts_for(CHAT);
        assert_eq!(texts.len(), 1);
        assert!(texts[0].contains("206348"));
    }

    #[tokio::test]
    async fn high_coefficient_produces_nothing() {
        let supply = Arc::new(FakeSupply::with_records(vec![coefficient(
            206348,
            dec!(5),
            "Короба",
        )]));
        let messenger = Arc::new(RecordingMessenger::new());

        let sent = poller(supply, messenger.clone()).poll_once(CHAT).await.unwrap();

        assert_eq!(sent, 0);
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn one_notification_per_matching_record() {
        let supply = Arc::new(FakeSupply::with_records(vec![
            coefficient(206348, dec!(0), "Короба"),
            coefficient(206348, dec!(1), "Суперсейф"),
            coefficient(158311, dec!(1), "Короба"),
            coefficient(206348, dec!(3), "Короба"),
        ]));
        let messenger = Arc::new(RecordingMessenger::new());

        let sent = poller(supply, messenger.clone()).poll_once(CHAT).await.unwrap();

        assert_eq!(sent, 2);
        assert_eq!(messenger.texts_for(CHAT).len(), 2);
    }

    #[tokio::test]
    async fn poll_requests_all_watched_warehouses() {
        let supply = Arc::new(FakeSupply::with_records(vec![]));
        let messenger = Arc::new(RecordingMessenger::new());

        poller(supply.clone(), messenger).poll_once(CHAT).await.unwrap();

        assert_eq!(
            supply.last_request(),
            Some(vec![WarehouseId::new(206348), WarehouseId::new(158311)])
        );
    }

    #[tokio::test(start_paused = true)]
    async fn errors_back_off_longer_than_interval() {
        let supply = Arc::new(FakeSupply::with_records(vec![coefficient(
            206348,
            dec!(1),
            "Короба",
        )]));
        supply.push_error(ApiError::RateLimited);
        let messenger = Arc::new(RecordingMessenger::new());

        let handle = tokio::spawn(poller(supply.clone(), messenger.clone()).run(CHAT));

        tokio::time::sleep(Duration::from_secs(29)).await;
        assert_eq!(supply.coefficient_calls(), 1);
        assert!(messenger.sent().is_empty());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(supply.coefficient_calls(), 2);
        assert_eq!(messenger.texts_for(CHAT).len(), 1);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn cycles_repeat_on_interval() {
        let supply = Arc::new(FakeSupply::with_records(vec![coefficient(
            206348,
            dec!(1),
            "Короба",
        )]));
        let messenger = Arc::new(RecordingMessenger::new());

        let handle = tokio::spawn(poller(supply.clone(), messenger.clone()).run(CHAT));
        tokio::time::sleep(Duration::from_secs(30)).await;

        // t = 0, 12, 24
        assert_eq!(supply.coefficient_calls(), 3);
        assert_eq!(messenger.texts_for(CHAT).len(), 3);

        handle.abort();
    }
}
