//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; tokens come from the environment
//! (`TELEGRAM_BOT_TOKEN`, `WB_SUPPLY_API_KEY`, `WB_ANALYTICS_API_KEY`,
//! `WB_PROMOTION_API_KEY`) and are never read from the file.
//!
//! # Example
//!
//! ```no_run
//! use slotwatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     let _guard = config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::api::{ApiConfig, ApiKeys};
use super::booking::BookingConfig;
use super::logging::LoggingConfig;
use super::monitor::{BroadcastConfig, MonitorConfig, SlotCheckConfig};
use super::reports::ReportsConfig;
use super::telegram::TelegramAppConfig;
use crate::error::{ConfigError, Result};

/// Environment variable holding the bot token.
pub const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Main application configuration.
///
/// Every section is optional; an empty file yields the production defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Telegram bot settings.
    #[serde(default)]
    pub telegram: TelegramAppConfig,

    /// Marketplace endpoints and timeouts.
    #[serde(default)]
    pub api: ApiConfig,

    /// Per-conversation coefficient monitor.
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// One-shot availability check.
    #[serde(default)]
    pub slot_check: SlotCheckConfig,

    /// Analytics request parameters.
    #[serde(default)]
    pub reports: ReportsConfig,

    /// Browser booker.
    #[serde(default)]
    pub booking: BookingConfig,

    /// Proactive notifications to a fixed chat list.
    #[serde(default)]
    pub broadcast: BroadcastConfig,

    /// Delay before the service is restarted after a fatal error.
    #[serde(default = "default_restart_delay_secs")]
    pub restart_delay_secs: u64,
}

const fn default_restart_delay_secs() -> u64 {
    10
}

impl Config {
    /// Parse configuration from TOML content and pull secrets from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        // Secrets never come from the config file
        config.telegram.bot_token = std::env::var(BOT_TOKEN_ENV).ok();
        config.api.keys = ApiKeys::from_env();

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        for (field, url) in [
            ("supplies_url", &self.api.supplies_url),
            ("analytics_url", &self.api.analytics_url),
            ("advert_url", &self.api.advert_url),
        ] {
            if url.is_empty() {
                return Err(ConfigError::MissingField { field }.into());
            }
        }
        if self.logging.file.as_ref().is_some_and(|f| f.max_bytes == 0) {
            return Err(ConfigError::InvalidValue {
                field: "logging.file.max_bytes",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.monitor.warehouses.is_empty() {
            return Err(ConfigError::MissingField {
                field: "monitor.warehouses",
            }
            .into());
        }
        if !self
            .monitor
            .warehouses
            .iter()
            .any(|w| w.id == self.monitor.target_warehouse_id)
        {
            return Err(ConfigError::InvalidValue {
                field: "target_warehouse_id",
                reason: "must be one of monitor.warehouses".to_string(),
            }
            .into());
        }
        if self.monitor.poll_interval_secs == 0 || self.monitor.error_backoff_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "monitor intervals",
                reason: "poll and backoff intervals must be greater than 0".to_string(),
            }
            .into());
        }
        if self.monitor.box_type.is_empty() {
            return Err(ConfigError::MissingField {
                field: "monitor.box_type",
            }
            .into());
        }

        if self.slot_check.min_coefficient > self.slot_check.max_coefficient {
            return Err(ConfigError::InvalidValue {
                field: "slot_check.min_coefficient",
                reason: "must be <= max_coefficient".to_string(),
            }
            .into());
        }
        if self.slot_check.max_coefficient < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "slot_check.max_coefficient",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }

        for (field, period) in self.reports.periods() {
            if period.start > period.end {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "start must not be after end".to_string(),
                }
                .into());
            }
        }

        if self.booking.program.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "booking.program",
            }
            .into());
        }
        if self.booking.retry_delay_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "booking.retry_delay_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.broadcast.enabled && self.broadcast.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "broadcast.interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Bot token, required to start the service.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] when `TELEGRAM_BOT_TOKEN` is unset.
    #[allow(clippy::result_large_err)]
    pub fn bot_token(&self) -> Result<&str> {
        self.telegram
            .bot_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingEnv(BOT_TOKEN_ENV).into())
    }

    #[must_use]
    pub const fn restart_delay(&self) -> Duration {
        Duration::from_secs(self.restart_delay_secs)
    }

    /// Initialize logging with the configured settings.
    #[must_use = "dropping the guard stops file logging"]
    pub fn init_logging(&self) -> Option<tracing_appender::non_blocking::WorkerGuard> {
        self.logging.init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WarehouseId;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.monitor.poll_interval_secs, 12);
        assert_eq!(config.monitor.error_backoff_secs, 30);
        assert_eq!(config.monitor.restart_grace_secs, 1);
        assert_eq!(config.monitor.max_coefficient, dec!(3));
        assert_eq!(config.monitor.box_type, "Короба");
        assert_eq!(
            config.monitor.warehouse_ids(),
            vec![WarehouseId::new(206_348), WarehouseId::new(158_311)]
        );
        assert_eq!(config.booking.retry_delay_secs, 10);
        assert!(!config.broadcast.enabled);
    }

    #[test]
    fn rejects_target_outside_watched_set() {
        let toml = r#"
[monitor]
warehouses = [{ id = 1, name = "A" }]
target_warehouse_id = 2
"#;
        assert!(matches!(
            Config::parse_toml(toml),
            Err(crate::error::Error::Config(ConfigError::InvalidValue {
                field: "target_warehouse_id",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_inverted_slot_window() {
        let toml = r#"
[slot_check]
min_coefficient = 5
max_coefficient = 1
"#;
        assert!(Config::parse_toml(toml).is_err());
    }

    #[test]
    fn monitor_rule_reflects_config() {
        let toml = r#"
[monitor]
warehouses = [{ id = 7, name = "A" }]
target_warehouse_id = 7
max_coefficient = 1.5
box_type = "Паллеты"
"#;
        let rule = Config::parse_toml(toml).unwrap().monitor.rule();
        assert_eq!(rule.target_warehouse, WarehouseId::new(7));
        assert_eq!(rule.max_coefficient, dec!(1.5));
        assert_eq!(rule.box_type_fragment, "Паллеты");
    }
}
