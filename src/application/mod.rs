//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod booking;
pub mod broadcast;
pub mod monitor;
pub mod notice;
pub mod poller;
pub mod slot_check;

pub use booking::BookingService;
pub use broadcast::BroadcastMonitor;
pub use monitor::MonitorManager;
pub use poller::CoefficientPoller;
pub use slot_check::SlotCheck;
