//! Wildberries REST payloads.
//!
//! Field names follow the API; conversion into domain types drops records
//! that cannot be interpreted.
//!
//! Example coefficient entry:
//! ```json
//! {"date":"2025-06-13T00:00:00Z","coefficient":1,"warehouseID":206348,
//!  "warehouseName":"Тула","allowUnload":true,"boxTypeName":"Короба","boxTypeID":2}
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::{Advert, CoefficientRecord, HiddenProduct, Warehouse, WarehouseId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoefficientDto {
    #[serde(rename = "warehouseID", alias = "warehouseId")]
    pub warehouse_id: u64,
    #[serde(default)]
    pub warehouse_name: String,
    #[serde(default)]
    pub coefficient: Option<Decimal>,
    #[serde(default, alias = "dateStart")]
    pub date: String,
    #[serde(default)]
    pub box_type_name: String,
    #[serde(default, rename = "boxTypeID", alias = "boxTypeId")]
    pub box_type_id: Option<u32>,
    #[serde(default)]
    pub allow_unload: bool,
}

impl CoefficientDto {
    /// Convert to a domain record; `None` when the coefficient is absent.
    #[must_use]
    pub fn into_record(self) -> Option<CoefficientRecord> {
        let Some(coefficient) = self.coefficient else {
            debug!(
                warehouse_id = self.warehouse_id,
                date = %self.date,
                "Skipping coefficient entry without a value"
            );
            return None;
        };
        Some(CoefficientRecord {
            warehouse_id: WarehouseId::new(self.warehouse_id),
            warehouse_name: self.warehouse_name,
            coefficient,
            date_start: self.date,
            box_type_name: self.box_type_name,
            box_type_id: self.box_type_id,
            allow_unload: self.allow_unload,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct WarehouseDto {
    #[serde(rename = "ID", alias = "id")]
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

impl From<WarehouseDto> for Warehouse {
    fn from(dto: WarehouseDto) -> Self {
        Self {
            id: WarehouseId::new(dto.id),
            name: dto.name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HiddenProductsResponse {
    #[serde(default, alias = "report")]
    pub data: Option<Vec<HiddenProductDto>>,
}

#[derive(Debug, Deserialize)]
pub struct HiddenProductDto {
    #[serde(default, alias = "nmId")]
    pub id: Value,
    #[serde(default, alias = "title")]
    pub name: String,
}

impl From<HiddenProductDto> for HiddenProduct {
    fn from(dto: HiddenProductDto) -> Self {
        let id = match dto.id {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };
        Self { id, name: dto.name }
    }
}

#[derive(Debug, Deserialize)]
pub struct AdvertDto {
    #[serde(alias = "advertId")]
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

impl From<AdvertDto> for Advert {
    fn from(dto: AdvertDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn coefficient_dto_parses_api_shape() {
        let json = r#"{"date":"2025-06-13T00:00:00Z","coefficient":2.5,"warehouseID":206348,
            "warehouseName":"Тула","allowUnload":true,"boxTypeName":"Короба","boxTypeID":2}"#;
        let record = serde_json::from_str::<CoefficientDto>(json)
            .unwrap()
            .into_record()
            .unwrap();
        assert_eq!(record.warehouse_id, WarehouseId::new(206348));
        assert_eq!(record.coefficient, dec!(2.5));
        assert_eq!(record.box_type_id, Some(2));
        assert!(record.allow_unload);
        assert_eq!(record.date_start, "2025-06-13T00:00:00Z");
    }

    #[test]
    fn coefficient_dto_without_value_is_dropped() {
        let json = r#"{"warehouseID":1,"coefficient":null,"boxTypeName":"Короба"}"#;
        let dto: CoefficientDto = serde_json::from_str(json).unwrap();
        assert!(dto.into_record().is_none());
    }

    #[test]
    fn coefficient_dto_accepts_negative_sentinel() {
        let json = r#"{"warehouseID":1,"coefficient":-1}"#;
        let record = serde_json::from_str::<CoefficientDto>(json)
            .unwrap()
            .into_record()
            .unwrap();
        assert_eq!(record.coefficient, dec!(-1));
    }

    #[test]
    fn hidden_product_id_renders_numbers() {
        let json = r#"{"data":[{"nmId":123,"title":"Кружка"},{"id":"abc","name":"Ложка"}]}"#;
        let response: HiddenProductsResponse = serde_json::from_str(json).unwrap();
        let products: Vec<HiddenProduct> = response
            .data
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect();
        assert_eq!(products[0].id, "123");
        assert_eq!(products[0].name, "Кружка");
        assert_eq!(products[1].id, "abc");
    }
}
