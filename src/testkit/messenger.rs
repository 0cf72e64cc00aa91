//! Recording messenger.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::ConversationId;
use crate::error::{Error, Result};
use crate::port::{Messenger, OutboundMessage};

/// Keeps every message in memory instead of delivering it.
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<(ConversationId, OutboundMessage)>>,
    failing: bool,
    slow: Option<(ConversationId, Duration)>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A messenger whose every send fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Delay every send to `conversation` by `delay` before recording it.
    #[must_use]
    pub fn slow_for(mut self, conversation: ConversationId, delay: Duration) -> Self {
        self.slow = Some((conversation, delay));
        self
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<(ConversationId, OutboundMessage)> {
        self.sent.lock().clone()
    }

    /// Texts sent to one conversation, in order.
    pub fn texts_for(&self, conversation: ConversationId) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .filter(|(c, _)| *c == conversation)
            .map(|(_, m)| m.text.clone())
            .collect()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, conversation: ConversationId, message: OutboundMessage) -> Result<()> {
        if self.failing {
            return Err(Error::Messenger("delivery refused".into()));
        }
        if let Some((slow, delay)) = self.slow {
            if slow == conversation {
                tokio::time::sleep(delay).await;
            }
        }
        self.sent.lock().push((conversation, message));
        Ok(())
    }
}
