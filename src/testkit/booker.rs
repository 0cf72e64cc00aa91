//! Scripted slot booker.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::BookingError;
use crate::port::SlotBooker;

/// Replays queued outcomes, then reports `Ok(false)` forever.
#[derive(Debug, Default)]
pub struct ScriptedBooker {
    outcomes: Mutex<VecDeque<Result<bool, BookingError>>>,
    attempts: AtomicU32,
}

impl ScriptedBooker {
    pub fn new(outcomes: Vec<Result<bool, BookingError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            attempts: AtomicU32::new(0),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SlotBooker for ScriptedBooker {
    async fn try_book(&self) -> Result<bool, BookingError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.outcomes.lock().pop_front().unwrap_or(Ok(false))
    }
}
