//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (the marketplace API, the messenger, the browser booker).
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌───────────┐          ┌─────────────┐              ┌───────────┐
//! │Marketplace│          │  Messenger  │              │  Booker   │
//! │  Adapter  │          │   Adapter   │              │  Adapter  │
//! └───────────┘          └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`SupplyApi`], [`SellerAnalyticsApi`] - Marketplace integration
//! - [`Messenger`] - Outbound chat messages
//! - [`SlotBooker`] - Delivery slot reservation

pub mod outbound;

pub use outbound::booker::SlotBooker;
pub use outbound::marketplace::{SellerAnalyticsApi, SupplyApi};
pub use outbound::messenger::{Messenger, OutboundMessage, TextFormat};
