//! Wildberries seller API integration.
//!
//! Three API hosts are involved: supplies (warehouses and acceptance
//! coefficients), seller analytics (search, funnel, reports, hidden cards)
//! and advertising (campaigns, keyword stats). Each uses its own token.

pub mod client;
pub mod dto;
pub mod response;

pub use client::WildberriesClient;
