//! Slot booking retry loop.
//!
//! Attempts run back to back with a fixed pause until one succeeds. There is
//! no attempt cap; the loop ends only on success or when its task is
//! aborted.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::notice;
use crate::domain::ConversationId;
use crate::port::{Messenger, SlotBooker};

pub struct BookingService {
    booker: Arc<dyn SlotBooker>,
    messenger: Arc<dyn Messenger>,
    retry_delay: Duration,
}

impl BookingService {
    pub fn new(
        booker: Arc<dyn SlotBooker>,
        messenger: Arc<dyn Messenger>,
        retry_delay: Duration,
    ) -> Self {
        Self {
            booker,
            messenger,
            retry_delay,
        }
    }

    /// Run the retry loop in the background.
    pub fn spawn(self: &Arc<Self>, conversation: ConversationId) -> JoinHandle<()> {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            service.run_until_booked(conversation).await;
        })
    }

    /// Retry until a slot is booked, then notify the conversation.
    ///
    /// Returns the number of attempts made.
    pub async fn run_until_booked(&self, conversation: ConversationId) -> u32 {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            match self.booker.try_book().await {
                Ok(true) => {
                    info!(conversation = %conversation, attempts, "Slot booked");
                    if let Err(e) = self
                        .messenger
                        .send_text(conversation, notice::SLOT_BOOKED)
                        .await
                    {
                        error!(conversation = %conversation, error = %e, "Failed to report booked slot");
                    }
                    return attempts;
                }
                Ok(false) => {
                    info!(conversation = %conversation, attempt = attempts, "No slot booked, retrying");
                }
                Err(e) => {
                    warn!(conversation = %conversation, attempt = attempts, error = %e, "Booking attempt failed");
                }
            }
            tokio::time::sleep(self.retry_delay).await;
        }
    }
}
