//! Texts pushed to conversations by background tasks.

use std::time::Duration;

use crate::domain::{CoefficientRecord, MonitorRule};
use crate::infrastructure::config::monitor::WatchedWarehouse;

/// Link appended to every slot alert.
pub const SUPPLIES_URL: &str = "https://seller.wildberries.ru/supplies-management/all-supplies";

pub const BOOKING_STARTED: &str = "🔄 Запускаю попытки брони слота...";
pub const SLOT_BOOKED: &str = "✅ Слот успешно забронирован!";

/// Alert for one coefficient record that passed a threshold rule.
#[must_use]
pub fn coefficient_alert(record: &CoefficientRecord) -> String {
    format!(
        "Склад: {}\n\
        ID: {}, Коэффициент: {}, Дата начала: {}, Тип поставки: {}\n\
        Дополнительная информация: {SUPPLIES_URL}",
        record.warehouse_name,
        record.warehouse_id,
        record.coefficient.normalize(),
        record.display_date(),
        record.box_type_name,
    )
}

/// Announcement sent once when a conversation's monitor starts.
#[must_use]
pub fn monitor_started(
    warehouses: &[WatchedWarehouse],
    rule: &MonitorRule,
    interval: Duration,
) -> String {
    let mut msg = String::from("✅ Запущен мониторинг складов:\n");
    for warehouse in warehouses {
        msg.push_str(&format!("• {} (ID {})\n", warehouse.name, warehouse.id));
    }

    let target = warehouses
        .iter()
        .find(|w| w.id == rule.target_warehouse)
        .map_or_else(
            || format!("ID {}", rule.target_warehouse),
            |w| format!("{} (ID {})", w.name, w.id),
        );

    msg.push_str(&format!(
        "\n• Уведомления при коэффициенте ≤ {} на складе {target}\n\
        • Только для поставок типа '{}'\n\
        • Обновление каждые {} секунд",
        rule.max_coefficient.normalize(),
        rule.box_type_fragment,
        interval.as_secs(),
    ));
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WarehouseId;
    use rust_decimal_macros::dec;

    fn record() -> CoefficientRecord {
        CoefficientRecord {
            warehouse_id: WarehouseId::new(206348),
            warehouse_name: "Тула".into(),
            coefficient: dec!(2.50),
            date_start: "2025-06-13T00:00:00Z".into(),
            box_type_name: "Короба".into(),
            box_type_id: Some(2),
            allow_unload: true,
        }
    }

    #[test]
    fn alert_names_warehouse_and_date() {
        let text = coefficient_alert(&record());
        assert!(text.starts_with("Склад: Тула\n"));
        assert!(text.contains("ID: 206348, Коэффициент: 2.5, Дата начала: 2025-06-13 00:00:00"));
        assert!(text.contains("Тип поставки: Короба"));
        assert!(text.ends_with(SUPPLIES_URL));
    }

    #[test]
    fn announcement_lists_warehouses_interval_and_threshold() {
        let warehouses = vec![
            WatchedWarehouse {
                id: WarehouseId::new(206348),
                name: "Тула".into(),
            },
            WatchedWarehouse {
                id: WarehouseId::new(158311),
                name: "Подольск".into(),
            },
        ];
        let rule = MonitorRule::new(WarehouseId::new(206348), dec!(3), "Короба");
        let text = monitor_started(&warehouses, &rule, Duration::from_secs(12));

        assert!(text.contains("• Тула (ID 206348)"));
        assert!(text.contains("• Подольск (ID 158311)"));
        assert!(text.contains("≤ 3 на складе Тула (ID 206348)"));
        assert!(text.contains("'Короба'"));
        assert!(text.contains("каждые 12 секунд"));
    }
}
