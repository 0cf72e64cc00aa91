//! Infrastructure configuration modules.

pub mod api;
pub mod booking;
pub mod logging;
pub mod monitor;
pub mod reports;
pub mod settings;
pub mod telegram;
