//! Wildberries REST API client.
//!
//! Every call goes through [`WildberriesClient::execute`], which maps the
//! HTTP status onto [`ApiError`](crate::error::ApiError). Nothing here
//! produces user-facing text; see the Telegram formatter for that.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::dto::{AdvertDto, CoefficientDto, HiddenProductsResponse, WarehouseDto};
use super::response::{check_status, decode};
use crate::domain::{Advert, CoefficientRecord, HiddenProduct, ReportTicket, Warehouse, WarehouseId};
use crate::error::ApiResult;
use crate::infrastructure::config::api::ApiConfig;
use crate::infrastructure::config::reports::{Period, ReportsConfig};
use crate::port::{SellerAnalyticsApi, SupplyApi};

const COEFFICIENTS_PATH: &str = "/api/v1/acceptance/coefficients";
const WAREHOUSES_PATH: &str = "/api/v1/warehouses";
const HIDDEN_PRODUCTS_PATH: &str = "/api/v1/analytics/banned-products/shadowed";
const SEARCH_TEXTS_PATH: &str = "/api/v2/search-report/product/search-texts";
const NM_REPORT_DETAIL_PATH: &str = "/api/v2/nm-report/detail";
const NM_REPORT_DOWNLOADS_PATH: &str = "/api/v2/nm-report/downloads";
const KEYWORD_STATS_PATH: &str = "/adv/v0/stats/keywords";
const ADVERTS_PATH: &str = "/adv/v0/adverts";

/// HTTP client for the Wildberries seller APIs.
pub struct WildberriesClient {
    http: HttpClient,
    api: ApiConfig,
    reports: ReportsConfig,
}

impl WildberriesClient {
    #[must_use]
    pub fn new(api: ApiConfig, reports: ReportsConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .connect_timeout(Duration::from_secs(api.connect_timeout_secs))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self { http, api, reports }
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }

    /// Send a request and return the body of a 200 response.
    async fn execute(&self, request: RequestBuilder, endpoint: &'static str) -> ApiResult<String> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(endpoint, error = %err, "API request failed to send");
                return Err(err.into());
            }
        };

        let status = response.status();
        let body = response.text().await?;
        debug!(endpoint, status = status.as_u16(), "API response received");

        match check_status(status, body) {
            Ok(body) => Ok(body),
            Err(err) => {
                warn!(endpoint, status = status.as_u16(), error = %err, "API returned an error");
                Err(err)
            }
        }
    }

    async fn fetch<T>(&self, request: RequestBuilder, endpoint: &'static str) -> ApiResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let body = self.execute(request, endpoint).await?;
        decode(&body)
    }

    fn supplies(&self, path: &str) -> RequestBuilder {
        self.http
            .get(format!("{}{path}", self.api.supplies_url))
            .header("Authorization", Self::bearer(&self.api.keys.supply))
    }

    fn analytics_post(&self, path: &str, body: &Value) -> RequestBuilder {
        self.http
            .post(format!("{}{path}", self.api.analytics_url))
            .header("Authorization", Self::bearer(&self.api.keys.analytics))
            .json(body)
    }

    fn advert(&self, path: &str) -> RequestBuilder {
        self.http
            .get(format!("{}{path}", self.api.advert_url))
            .header("Authorization", Self::bearer(&self.api.keys.promotion))
    }

    fn date_range(period: Period) -> Value {
        json!({
            "startDate": period.start.format("%Y-%m-%d").to_string(),
            "endDate": period.end.format("%Y-%m-%d").to_string(),
        })
    }

    /// Body of the search-texts report request.
    #[must_use]
    pub fn search_queries_body(&self) -> Value {
        json!({
            "currentPeriod": Self::date_range(self.reports.current_period),
            "pastPeriod": Self::date_range(self.reports.past_period),
            "nmIds": self.reports.nm_ids,
            "topOrderBy": "openToCart",
            "orderBy": { "field": "avgPosition", "mode": "asc" },
            "limit": self.reports.search_limit,
        })
    }

    /// Body of the sales funnel (nm-report detail) request.
    #[must_use]
    pub fn sales_funnel_body(&self) -> Value {
        let period = self.reports.funnel_period;
        json!({
            "brandNames": [],
            "objectIDs": [],
            "tagIDs": [],
            "nmIDs": self.reports.nm_ids,
            "timezone": "",
            "period": {
                "begin": format!("{} 00:00:00", period.start.format("%Y-%m-%d")),
                "end": format!("{} 23:59:59", period.end.format("%Y-%m-%d")),
            },
            "orderBy": { "field": "openCard", "mode": "asc" },
            "page": 1,
        })
    }

    /// Body of a report-generation request with the given client-side id.
    #[must_use]
    pub fn create_report_body(&self, id: Uuid) -> Value {
        let period = self.reports.current_period;
        json!({
            "id": id.to_string(),
            "reportType": "DETAIL_HISTORY_REPORT",
            "userReportName": self.reports.report_name,
            "params": {
                "nmIDs": self.reports.nm_ids,
                "subjectIds": [],
                "brandNames": [],
                "tagIds": [],
                "startDate": period.start.format("%Y-%m-%d").to_string(),
                "endDate": period.end.format("%Y-%m-%d").to_string(),
                "timezone": self.reports.timezone,
                "aggregationLevel": "day",
                "skipDeletedNm": false,
            },
        })
    }
}

#[async_trait]
impl SupplyApi for WildberriesClient {
    async fn acceptance_coefficients(
        &self,
        warehouse_ids: &[WarehouseId],
    ) -> ApiResult<Vec<CoefficientRecord>> {
        if warehouse_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = warehouse_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let request = self
            .supplies(COEFFICIENTS_PATH)
            .query(&[("warehouseIDs", ids.as_str())]);

        let entries: Vec<CoefficientDto> = self.fetch(request, "acceptance_coefficients").await?;
        if entries.is_empty() {
            warn!(warehouses = %ids, "Empty acceptance coefficients response");
        }

        let records: Vec<CoefficientRecord> = entries
            .into_iter()
            .filter_map(CoefficientDto::into_record)
            .collect();
        debug!(count = records.len(), "Fetched acceptance coefficients");
        Ok(records)
    }

    async fn warehouses(&self) -> ApiResult<Vec<Warehouse>> {
        let entries: Vec<WarehouseDto> = self
            .fetch(self.supplies(WAREHOUSES_PATH), "warehouses")
            .await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl SellerAnalyticsApi for WildberriesClient {
    async fn hidden_products(&self) -> ApiResult<Vec<HiddenProduct>> {
        // This endpoint takes the bare token, without the Bearer scheme
        let request = self
            .http
            .get(format!("{}{HIDDEN_PRODUCTS_PATH}", self.api.analytics_url))
            .header("Authorization", &self.api.keys.analytics)
            .query(&[("sort", "nmId"), ("order", "asc")]);

        let response: HiddenProductsResponse = self.fetch(request, "hidden_products").await?;
        Ok(response
            .data
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn search_queries(&self) -> ApiResult<Value> {
        let request = self.analytics_post(SEARCH_TEXTS_PATH, &self.search_queries_body());
        self.fetch(request, "search_queries").await
    }

    async fn keyword_stats(&self) -> ApiResult<Value> {
        let period = self.reports.keyword_period;
        let request = self.advert(KEYWORD_STATS_PATH).query(&[
            ("advert_id", self.reports.advert_id.to_string()),
            ("from", period.start.format("%Y-%m-%d").to_string()),
            ("to", period.end.format("%Y-%m-%d").to_string()),
        ]);
        self.fetch(request, "keyword_stats").await
    }

    async fn sales_funnel(&self) -> ApiResult<Value> {
        let request = self.analytics_post(NM_REPORT_DETAIL_PATH, &self.sales_funnel_body());
        self.fetch(request, "sales_funnel").await
    }

    async fn create_report(&self) -> ApiResult<ReportTicket> {
        let id = Uuid::new_v4();
        let request = self.analytics_post(NM_REPORT_DOWNLOADS_PATH, &self.create_report_body(id));
        let response: Value = self.fetch(request, "create_report").await?;
        info!(report_id = %id, "Report generation requested");
        Ok(ReportTicket { id, response })
    }

    async fn adverts(&self) -> ApiResult<Vec<Advert>> {
        let entries: Vec<AdvertDto> = self.fetch(self.advert(ADVERTS_PATH), "adverts").await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }
}
