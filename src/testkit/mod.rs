//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for coefficient records.
//! - [`marketplace`] - In-memory [`SupplyApi`](crate::port::SupplyApi) and
//!   [`SellerAnalyticsApi`](crate::port::SellerAnalyticsApi) fakes with
//!   scripted failures.
//! - [`messenger`] - A [`Messenger`](crate::port::Messenger) that records
//!   everything it is asked to send.
//! - [`booker`] - A [`SlotBooker`](crate::port::SlotBooker) replaying scripted
//!   outcomes.

pub mod booker;
pub mod domain;
pub mod marketplace;
pub mod messenger;
