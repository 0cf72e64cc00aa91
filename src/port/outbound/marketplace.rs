//! Marketplace API ports.
//!
//! Split along the two audiences: the supply side feeds the coefficient
//! monitors, the analytics side feeds one-off command replies.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Advert, CoefficientRecord, HiddenProduct, ReportTicket, Warehouse, WarehouseId};
use crate::error::ApiResult;

/// Warehouse and acceptance-coefficient queries.
#[async_trait]
pub trait SupplyApi: Send + Sync {
    /// Coefficients for the given warehouses. An empty id list yields an
    /// empty result without a request.
    async fn acceptance_coefficients(
        &self,
        warehouse_ids: &[WarehouseId],
    ) -> ApiResult<Vec<CoefficientRecord>>;

    /// All warehouses known to the marketplace.
    async fn warehouses(&self) -> ApiResult<Vec<Warehouse>>;
}

/// Seller analytics and advertising queries.
#[async_trait]
pub trait SellerAnalyticsApi: Send + Sync {
    async fn hidden_products(&self) -> ApiResult<Vec<HiddenProduct>>;

    async fn search_queries(&self) -> ApiResult<Value>;

    async fn keyword_stats(&self) -> ApiResult<Value>;

    /// Sales funnel report. `Value::Null` when the API returns no data.
    async fn sales_funnel(&self) -> ApiResult<Value>;

    async fn create_report(&self) -> ApiResult<ReportTicket>;

    async fn adverts(&self) -> ApiResult<Vec<Advert>>;
}
