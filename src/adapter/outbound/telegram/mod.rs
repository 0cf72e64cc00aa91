//! Telegram delivery: message formatting and the chunking messenger.

pub mod format;
pub mod messenger;

pub use messenger::TelegramMessenger;
