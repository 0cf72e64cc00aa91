//! In-memory marketplace fakes.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{Advert, CoefficientRecord, HiddenProduct, ReportTicket, Warehouse, WarehouseId};
use crate::error::{ApiError, ApiResult};
use crate::port::{SellerAnalyticsApi, SupplyApi};

/// Supply API answering from a fixed record set.
///
/// Queued errors are returned by coefficient requests first, one per call.
/// Coefficient responses only include records for the requested warehouses.
#[derive(Debug, Default)]
pub struct FakeSupply {
    records: Vec<CoefficientRecord>,
    warehouses: Vec<Warehouse>,
    errors: Mutex<VecDeque<ApiError>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<Vec<WarehouseId>>>,
    panics: bool,
}

impl FakeSupply {
    pub fn with_records(records: Vec<CoefficientRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// A supply API whose coefficient requests panic.
    pub fn panicking() -> Self {
        Self {
            panics: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_warehouses(mut self, warehouses: Vec<Warehouse>) -> Self {
        self.warehouses = warehouses;
        self
    }

    pub fn push_error(&self, error: ApiError) {
        self.errors.lock().push_back(error);
    }

    pub fn coefficient_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<Vec<WarehouseId>> {
        self.last_request.lock().clone()
    }
}

#[async_trait]
impl SupplyApi for FakeSupply {
    async fn acceptance_coefficients(
        &self,
        warehouse_ids: &[WarehouseId],
    ) -> ApiResult<Vec<CoefficientRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock() = Some(warehouse_ids.to_vec());

        assert!(!self.panics, "supply fake configured to panic");

        if let Some(error) = self.errors.lock().pop_front() {
            return Err(error);
        }

        Ok(self
            .records
            .iter()
            .filter(|r| warehouse_ids.contains(&r.warehouse_id))
            .cloned()
            .collect())
    }

    async fn warehouses(&self) -> ApiResult<Vec<Warehouse>> {
        Ok(self.warehouses.clone())
    }
}

/// Analytics API with canned payloads. Queued errors are returned by
/// whichever call comes next.
#[derive(Debug, Default)]
pub struct FakeAnalytics {
    hidden: Vec<HiddenProduct>,
    adverts: Vec<Advert>,
    search: Value,
    keywords: Value,
    funnel: Value,
    report: Value,
    errors: Mutex<VecDeque<ApiError>>,
}

impl FakeAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_hidden(mut self, hidden: Vec<HiddenProduct>) -> Self {
        self.hidden = hidden;
        self
    }

    #[must_use]
    pub fn with_adverts(mut self, adverts: Vec<Advert>) -> Self {
        self.adverts = adverts;
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: Value) -> Self {
        self.search = search;
        self
    }

    #[must_use]
    pub fn with_keywords(mut self, keywords: Value) -> Self {
        self.keywords = keywords;
        self
    }

    #[must_use]
    pub fn with_funnel(mut self, funnel: Value) -> Self {
        self.funnel = funnel;
        self
    }

    #[must_use]
    pub fn with_report(mut self, report: Value) -> Self {
        self.report = report;
        self
    }

    pub fn push_error(&self, error: ApiError) {
        self.errors.lock().push_back(error);
    }

    fn next_error(&self) -> ApiResult<()> {
        match self.errors.lock().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SellerAnalyticsApi for FakeAnalytics {
    async fn hidden_products(&self) -> ApiResult<Vec<HiddenProduct>> {
        self.next_error()?;
        Ok(self.hidden.clone())
    }

    async fn search_queries(&self) -> ApiResult<Value> {
        self.next_error()?;
        Ok(self.search.clone())
    }

    async fn keyword_stats(&self) -> ApiResult<Value> {
        self.next_error()?;
        Ok(self.keywords.clone())
    }

    async fn sales_funnel(&self) -> ApiResult<Value> {
        self.next_error()?;
        Ok(self.funnel.clone())
    }

    async fn create_report(&self) -> ApiResult<ReportTicket> {
        self.next_error()?;
        Ok(ReportTicket {
            id: Uuid::nil(),
            response: self.report.clone(),
        })
    }

    async fn adverts(&self) -> ApiResult<Vec<Advert>> {
        self.next_error()?;
        Ok(self.adverts.clone())
    }
}
