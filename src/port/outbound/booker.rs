//! Slot booker port.

use async_trait::async_trait;

use crate::error::BookingError;

/// Attempts to reserve a delivery slot.
///
/// A single call is one full attempt and may take a long time.
#[async_trait]
pub trait SlotBooker: Send + Sync {
    /// `Ok(true)` when a slot was reserved, `Ok(false)` when the attempt ran
    /// but found nothing to book.
    async fn try_book(&self) -> Result<bool, BookingError>;
}
