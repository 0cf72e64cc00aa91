//! Slotwatch - Wildberries warehouse slots and seller analytics over Telegram.
//!
//! The bot answers seller-analytics commands, watches warehouse acceptance
//! coefficients per chat, and drives an external browser script to book a
//! delivery slot.
//!
//! # Architecture
//!
//! - **`domain`** - Coefficient records, warehouse ids, threshold rules
//! - **`port`** - Traits for the marketplace, messenger, and slot booker
//! - **`application`** - Monitor manager, poller, slot check, booking and
//!   broadcast loops
//! - **`adapter`** - Wildberries HTTP client, Telegram listener and
//!   messenger, script booker, CLI
//! - **`infrastructure`** - Configuration and logging
//! - **`app`** - Wiring and service lifetime
//!
//! # Features
//!
//! - `testkit` - Fakes for the ports, used by integration tests

pub mod adapter;
pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
