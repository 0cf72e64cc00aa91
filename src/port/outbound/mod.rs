//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod booker;
pub mod marketplace;
pub mod messenger;
