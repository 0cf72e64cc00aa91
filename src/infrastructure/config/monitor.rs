//! Warehouse coefficient monitoring configuration.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{MonitorRule, SlotWindowRule, WarehouseId};

/// A warehouse polled by the monitor, with the name used in announcements.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WatchedWarehouse {
    pub id: WarehouseId,
    pub name: String,
}

/// Per-conversation periodic monitor settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Warehouses fetched on every cycle.
    #[serde(default = "default_watched")]
    pub warehouses: Vec<WatchedWarehouse>,
    /// The only warehouse whose records can trigger a notification.
    #[serde(default = "default_target_warehouse")]
    pub target_warehouse_id: WarehouseId,
    #[serde(default = "default_max_coefficient")]
    pub max_coefficient: Decimal,
    /// Substring required in the box type name.
    #[serde(default = "default_box_type")]
    pub box_type: String,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Delay after a failed cycle.
    #[serde(default = "default_error_backoff_secs")]
    pub error_backoff_secs: u64,
    /// Pause after cancelling a previous monitor before starting a new one.
    #[serde(default = "default_restart_grace_secs")]
    pub restart_grace_secs: u64,
}

fn default_watched() -> Vec<WatchedWarehouse> {
    vec![
        WatchedWarehouse {
            id: WarehouseId::new(206_348),
            name: "Тула".into(),
        },
        WatchedWarehouse {
            id: WarehouseId::new(158_311),
            name: "Подольск".into(),
        },
    ]
}

const fn default_target_warehouse() -> WarehouseId {
    WarehouseId::new(206_348)
}

fn default_max_coefficient() -> Decimal {
    Decimal::from(3)
}

fn default_box_type() -> String {
    "Короба".into()
}

const fn default_poll_interval_secs() -> u64 {
    12
}

const fn default_error_backoff_secs() -> u64 {
    30
}

const fn default_restart_grace_secs() -> u64 {
    1
}

impl MonitorConfig {
    #[must_use]
    pub fn rule(&self) -> MonitorRule {
        MonitorRule::new(
            self.target_warehouse_id,
            self.max_coefficient,
            self.box_type.clone(),
        )
    }

    #[must_use]
    pub fn warehouse_ids(&self) -> Vec<WarehouseId> {
        self.warehouses.iter().map(|w| w.id).collect()
    }

    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    #[must_use]
    pub const fn error_backoff(&self) -> Duration {
        Duration::from_secs(self.error_backoff_secs)
    }

    #[must_use]
    pub const fn restart_grace(&self) -> Duration {
        Duration::from_secs(self.restart_grace_secs)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            warehouses: default_watched(),
            target_warehouse_id: default_target_warehouse(),
            max_coefficient: default_max_coefficient(),
            box_type: default_box_type(),
            poll_interval_secs: default_poll_interval_secs(),
            error_backoff_secs: default_error_backoff_secs(),
            restart_grace_secs: default_restart_grace_secs(),
        }
    }
}

/// One-shot availability check settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotCheckConfig {
    #[serde(default = "default_target_warehouse")]
    pub warehouse_id: WarehouseId,
    #[serde(default)]
    pub min_coefficient: Decimal,
    #[serde(default = "default_window_max")]
    pub max_coefficient: Decimal,
    #[serde(default = "default_box_type_id")]
    pub box_type_id: u32,
    /// Box types whose name contains this are skipped.
    #[serde(default = "default_excluded_box_type")]
    pub excluded_box_type: String,
}

fn default_window_max() -> Decimal {
    Decimal::ONE
}

const fn default_box_type_id() -> u32 {
    2
}

fn default_excluded_box_type() -> String {
    "QR-поставка".into()
}

impl SlotCheckConfig {
    #[must_use]
    pub fn rule(&self) -> SlotWindowRule {
        SlotWindowRule {
            min_coefficient: self.min_coefficient,
            max_coefficient: self.max_coefficient,
            box_type_id: self.box_type_id,
            excluded_fragment: self.excluded_box_type.clone(),
        }
    }
}

impl Default for SlotCheckConfig {
    fn default() -> Self {
        Self {
            warehouse_id: default_target_warehouse(),
            min_coefficient: Decimal::ZERO,
            max_coefficient: default_window_max(),
            box_type_id: default_box_type_id(),
            excluded_box_type: default_excluded_box_type(),
        }
    }
}

/// Proactive notifications pushed to a fixed chat list.
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub chat_ids: Vec<i64>,
    #[serde(default = "default_broadcast_interval_secs")]
    pub interval_secs: u64,
}

const fn default_broadcast_interval_secs() -> u64 {
    60
}

impl BroadcastConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            chat_ids: Vec::new(),
            interval_secs: default_broadcast_interval_secs(),
        }
    }
}
