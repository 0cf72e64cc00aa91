//! Marketplace-agnostic domain types.

pub mod analytics;
pub mod coefficient;
pub mod id;
pub mod threshold;

pub use analytics::{Advert, HiddenProduct, ReportTicket};
pub use coefficient::{CoefficientRecord, Warehouse};
pub use id::{ConversationId, WarehouseId};
pub use threshold::{CoefficientRule, MonitorRule, SlotWindowRule};
