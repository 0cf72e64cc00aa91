//! Warehouse acceptance coefficients.
//!
//! A coefficient is the marketplace's scarcity score for a delivery slot:
//! lower means easier to book. Records are transient and refetched on every
//! poll cycle.

use chrono::{DateTime, NaiveDateTime};
use rust_decimal::Decimal;

use super::id::WarehouseId;

/// A warehouse as listed by the supplies API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
}

/// One acceptance coefficient for a warehouse, date and box type.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientRecord {
    pub warehouse_id: WarehouseId,
    pub warehouse_name: String,
    pub coefficient: Decimal,
    /// Timestamp as sent by the API (RFC 3339, usually UTC).
    pub date_start: String,
    pub box_type_name: String,
    pub box_type_id: Option<u32>,
    pub allow_unload: bool,
}

impl CoefficientRecord {
    /// Human-readable start date: `2025-06-13T00:00:00Z` becomes
    /// `2025-06-13 00:00:00`.
    ///
    /// Unparseable values are passed through with the `T`/`Z` markers
    /// stripped.
    #[must_use]
    pub fn display_date(&self) -> String {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&self.date_start) {
            return parsed.naive_utc().format("%Y-%m-%d %H:%M:%S").to_string();
        }
        if let Ok(parsed) = NaiveDateTime::parse_from_str(&self.date_start, "%Y-%m-%dT%H:%M:%S") {
            return parsed.format("%Y-%m-%d %H:%M:%S").to_string();
        }
        self.date_start.replace('T', " ").replace('Z', "")
    }
}
