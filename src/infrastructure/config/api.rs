//! Marketplace API endpoints and credentials.

use serde::Deserialize;

/// Base URLs, timeouts and API keys for the marketplace.
///
/// Keys are never read from the config file; see [`ApiKeys::from_env`].
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_supplies_url")]
    pub supplies_url: String,
    #[serde(default = "default_analytics_url")]
    pub analytics_url: String,
    #[serde(default = "default_advert_url")]
    pub advert_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(skip)]
    pub keys: ApiKeys,
}

/// Per-audience API tokens.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    pub supply: String,
    pub analytics: String,
    pub promotion: String,
}

impl ApiKeys {
    pub const SUPPLY_ENV: &'static str = "WB_SUPPLY_API_KEY";
    pub const ANALYTICS_ENV: &'static str = "WB_ANALYTICS_API_KEY";
    pub const PROMOTION_ENV: &'static str = "WB_PROMOTION_API_KEY";

    /// Read keys from the environment. Missing keys are left empty and the
    /// API answers such requests with 401.
    #[must_use]
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).unwrap_or_default();
        Self {
            supply: read(Self::SUPPLY_ENV),
            analytics: read(Self::ANALYTICS_ENV),
            promotion: read(Self::PROMOTION_ENV),
        }
    }

    /// Names of the environment variables that were empty.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.supply.is_empty() {
            missing.push(Self::SUPPLY_ENV);
        }
        if self.analytics.is_empty() {
            missing.push(Self::ANALYTICS_ENV);
        }
        if self.promotion.is_empty() {
            missing.push(Self::PROMOTION_ENV);
        }
        missing
    }
}

fn default_supplies_url() -> String {
    "https://supplies-api.wildberries.ru".into()
}

fn default_analytics_url() -> String {
    "https://seller-analytics-api.wildberries.ru".into()
}

fn default_advert_url() -> String {
    "https://advert-api.wildberries.ru".into()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            supplies_url: default_supplies_url(),
            analytics_url: default_analytics_url(),
            advert_url: default_advert_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            keys: ApiKeys::default(),
        }
    }
}
