//! Outbound adapters (driven side).

pub mod browser;
pub mod telegram;
pub mod wildberries;
