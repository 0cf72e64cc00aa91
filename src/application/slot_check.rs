//! One-shot availability check against the configured slot window.

use tracing::{debug, info};

use crate::domain::{CoefficientRecord, CoefficientRule, SlotWindowRule, WarehouseId};
use crate::error::ApiResult;
use crate::infrastructure::config::monitor::SlotCheckConfig;
use crate::port::SupplyApi;

/// Looks up the target warehouse and returns its coefficients that fall
/// inside the slot window.
#[derive(Debug, Clone)]
pub struct SlotCheck {
    warehouse_id: WarehouseId,
    rule: SlotWindowRule,
}

impl SlotCheck {
    #[must_use]
    pub fn new(warehouse_id: WarehouseId, rule: SlotWindowRule) -> Self {
        Self { warehouse_id, rule }
    }

    #[must_use]
    pub fn from_config(config: &SlotCheckConfig) -> Self {
        Self::new(config.warehouse_id, config.rule())
    }

    #[must_use]
    pub const fn warehouse_id(&self) -> WarehouseId {
        self.warehouse_id
    }

    /// Run the check. An empty result means no matching slot (or the target
    /// warehouse is not listed at all).
    ///
    /// # Errors
    ///
    /// Propagates the first API failure from either request.
    pub async fn run(&self, supply: &dyn SupplyApi) -> ApiResult<Vec<CoefficientRecord>> {
        let warehouses = supply.warehouses().await?;
        let Some(warehouse) = warehouses.into_iter().find(|w| w.id == self.warehouse_id) else {
            info!(warehouse_id = %self.warehouse_id, "Target warehouse not listed");
            return Ok(Vec::new());
        };

        let records = supply.acceptance_coefficients(&[warehouse.id]).await?;
        let matched: Vec<CoefficientRecord> = self
            .rule
            .select(&records)
            .into_iter()
            .map(|record| CoefficientRecord {
                warehouse_name: warehouse.name.clone(),
                ..record.clone()
            })
            .collect();

        debug!(
            warehouse_id = %self.warehouse_id,
            fetched = records.len(),
            matched = matched.len(),
            "Slot check complete"
        );
        Ok(matched)
    }
}
