//! Threshold rules deciding which coefficients are worth a notification.
//!
//! Two rules exist for what is nominally the same business condition: the
//! periodic monitor matches on box type *name* with an upper bound only, while
//! the one-shot check matches on box type *id* within a closed range and
//! excludes QR supplies. They are kept side by side here so the difference
//! stays visible until the owners settle on one.

use rust_decimal::Decimal;

use super::coefficient::CoefficientRecord;
use super::id::WarehouseId;

/// A filter over coefficient records.
pub trait CoefficientRule: Send + Sync {
    fn matches(&self, record: &CoefficientRecord) -> bool;

    /// Keep only the records this rule accepts, preserving order.
    fn select<'a>(&self, records: &'a [CoefficientRecord]) -> Vec<&'a CoefficientRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Rule applied on every cycle of the periodic monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorRule {
    pub target_warehouse: WarehouseId,
    pub max_coefficient: Decimal,
    /// Substring the box type name must contain.
    pub box_type_fragment: String,
}

impl MonitorRule {
    #[must_use]
    pub fn new(
        target_warehouse: WarehouseId,
        max_coefficient: Decimal,
        box_type_fragment: impl Into<String>,
    ) -> Self {
        Self {
            target_warehouse,
            max_coefficient,
            box_type_fragment: box_type_fragment.into(),
        }
    }
}

impl CoefficientRule for MonitorRule {
    fn matches(&self, record: &CoefficientRecord) -> bool {
        record.warehouse_id == self.target_warehouse
            && record.coefficient <= self.max_coefficient
            && record.box_type_name.contains(&self.box_type_fragment)
    }
}

/// Rule applied by the one-shot availability check.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotWindowRule {
    pub min_coefficient: Decimal,
    pub max_coefficient: Decimal,
    pub box_type_id: u32,
    /// Box type names containing this are rejected.
    pub excluded_fragment: String,
}

impl CoefficientRule for SlotWindowRule {
    fn matches(&self, record: &CoefficientRecord) -> bool {
        record.coefficient >= self.min_coefficient
            && record.coefficient <= self.max_coefficient
            && record.box_type_id == Some(self.box_type_id)
            && !record.box_type_name.contains(&self.excluded_fragment)
    }
}
