//! Builders for domain primitives used across tests.

use rust_decimal::Decimal;

use crate::domain::{CoefficientRecord, WarehouseId};

/// A coefficient record for `warehouse` with box type id 2 and a fixed
/// start date.
pub fn coefficient(warehouse: u64, coefficient: Decimal, box_type: &str) -> CoefficientRecord {
    CoefficientRecord {
        warehouse_id: WarehouseId::new(warehouse),
        warehouse_name: format!("Склад {warehouse}"),
        coefficient,
        date_start: "2025-06-13T00:00:00Z".to_string(),
        box_type_name: box_type.to_string(),
        box_type_id: Some(2),
        allow_unload: true,
    }
}

/// Same as [`coefficient`] with an explicit box type id.
pub fn coefficient_with_type(
    warehouse: u64,
    coefficient: Decimal,
    box_type: &str,
    box_type_id: Option<u32>,
) -> CoefficientRecord {
    CoefficientRecord {
        box_type_id,
        ..self::coefficient(warehouse, coefficient, box_type)
    }
}
