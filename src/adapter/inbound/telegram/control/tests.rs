use std::time::Duration;

use rust_decimal_macros::dec;
use serde_json::json;

use super::*;
use crate::domain::{Advert, HiddenProduct, Warehouse, WarehouseId};
use crate::error::{ApiError, ForbiddenBody};
use crate::infrastructure::config::monitor::{MonitorConfig, SlotCheckConfig};
use crate::port::TextFormat;
use crate::testkit::booker::ScriptedBooker;
use crate::testkit::domain::coefficient;
use crate::testkit::marketplace::{FakeAnalytics, FakeSupply};
use crate::testkit::messenger::RecordingMessenger;

const CHAT: ConversationId = ConversationId::new(77);

struct Harness {
    control: TelegramControl,
    messenger: Arc<RecordingMessenger>,
    monitors: Arc<MonitorManager>,
    booker: Arc<ScriptedBooker>,
}

fn harness(supply: FakeSupply, analytics: FakeAnalytics) -> Harness {
    let messenger = Arc::new(RecordingMessenger::new());
    let supply: Arc<FakeSupply> = Arc::new(supply);
    let booker = Arc::new(ScriptedBooker::new(vec![Ok(true)]));
    let monitors = Arc::new(MonitorManager::new(
        supply.clone(),
        messenger.clone(),
        MonitorConfig::default(),
    ));
    let booking = Arc::new(BookingService::new(
        booker.clone(),
        messenger.clone(),
        Duration::from_secs(10),
    ));
    let control = TelegramControl::new(
        messenger.clone(),
        supply,
        Arc::new(analytics),
        monitors.clone(),
        booking,
        SlotCheck::from_config(&SlotCheckConfig::default()),
    );
    Harness {
        control,
        messenger,
        monitors,
        booker,
    }
}

fn empty() -> Harness {
    harness(FakeSupply::default(), FakeAnalytics::new())
}

#[tokio::test]
async fn help_lists_commands() {
    let h = empty();
    h.control.execute(CHAT, TelegramCommand::Start).await;

    let texts = h.messenger.texts_for(CHAT);
    assert_eq!(texts, vec![command_help().to_string()]);
}

#[tokio::test]
async fn slot_check_sends_preamble_then_result() {
    let supply = FakeSupply::with_records(vec![coefficient(206348, dec!(1), "Короба")])
        .with_warehouses(vec![Warehouse {
            id: WarehouseId::new(206348),
            name: "Тула".into(),
        }]);
    let h = harness(supply, FakeAnalytics::new());

    h.control.execute(CHAT, TelegramCommand::CheckSlots).await;

    let texts = h.messenger.texts_for(CHAT);
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0], "Отслеживание складов:");
    assert!(texts[1].contains("Склад: Тула (ID 206348)"));
}

#[tokio::test]
async fn api_errors_are_rendered_not_raised() {
    let analytics = FakeAnalytics::new();
    analytics.push_error(ApiError::Forbidden(ForbiddenBody::Structured {
        title: "t".into(),
        detail: "d".into(),
        request_id: "r".into(),
        origin: "o".into(),
    }));
    let h = harness(FakeSupply::default(), analytics);

    h.control.execute(CHAT, TelegramCommand::HiddenProducts).await;

    let texts = h.messenger.texts_for(CHAT);
    assert_eq!(texts.len(), 2);
    assert_eq!(
        texts[1],
        "Доступ запрещен. Заголовок ошибки: t, Детали ошибки: d, \
        Уникальный ID запроса: r, ID внутреннего сервиса WB: o"
    );
}

#[tokio::test]
async fn rate_limit_reply_is_fixed() {
    let analytics = FakeAnalytics::new();
    analytics.push_error(ApiError::RateLimited);
    let h = harness(FakeSupply::default(), analytics);

    h.control.execute(CHAT, TelegramCommand::KeywordStats).await;

    assert_eq!(
        h.messenger.texts_for(CHAT).last().map(String::as_str),
        Some("Слишком много запросов")
    );
}

#[tokio::test]
async fn hidden_products_and_adverts_render_lists() {
    let analytics = FakeAnalytics::new()
        .with_hidden(vec![HiddenProduct {
            id: "1".into(),
            name: "Кружка".into(),
        }])
        .with_adverts(vec![Advert {
            id: 9,
            name: "Весна".into(),
        }]);
    let h = harness(FakeSupply::default(), analytics);

    h.control.execute(CHAT, TelegramCommand::HiddenProducts).await;
    h.control.execute(CHAT, TelegramCommand::Adverts).await;

    let texts = h.messenger.texts_for(CHAT);
    assert_eq!(texts.len(), 4);
    assert!(texts[1].contains("ID: 1, Название: Кружка"));
    assert_eq!(texts[3], "Кампании:\n📢 Весна (ID: 9)");
}

#[tokio::test]
async fn empty_funnel_has_fixed_reply() {
    let h = empty();
    h.control.execute(CHAT, TelegramCommand::SalesFunnel).await;

    let texts = h.messenger.texts_for(CHAT);
    assert_eq!(texts.last().map(String::as_str), Some(format::FUNNEL_EMPTY));
}

#[tokio::test]
async fn funnel_is_sent_as_markdown() {
    let analytics =
        FakeAnalytics::new().with_funnel(json!({ "data": { "cards": [ { "nmID": 310364796 } ] } }));
    let h = harness(FakeSupply::default(), analytics);

    h.control.execute(CHAT, TelegramCommand::SalesFunnel).await;

    let sent = h.messenger.sent();
    let (_, last) = sent.last().unwrap();
    assert_eq!(last.format, TextFormat::MarkdownV2);
    assert!(last.text.contains("Артикул"));
}

#[tokio::test]
async fn report_reply_names_the_ticket() {
    let analytics = FakeAnalytics::new().with_report(json!({ "data": "Created" }));
    let h = harness(FakeSupply::default(), analytics);

    h.control.execute(CHAT, TelegramCommand::CreateReport).await;

    let texts = h.messenger.texts_for(CHAT);
    assert_eq!(texts[0], "Создание отчета:");
    assert!(texts[1].contains("00000000-0000-0000-0000-000000000000"));
    assert!(texts[1].contains("Created"));
}

#[tokio::test(start_paused = true)]
async fn monitor_command_registers_a_monitor() {
    let h = empty();

    h.control
        .execute(CHAT, TelegramCommand::MonitorCoefficients)
        .await;
    h.control
        .execute(CHAT, TelegramCommand::MonitorCoefficients)
        .await;

    assert_eq!(h.monitors.active_count(), 1);
    h.monitors.shutdown();
}

#[tokio::test(start_paused = true)]
async fn bookslot_starts_background_booking() {
    let h = empty();

    h.control.execute(CHAT, TelegramCommand::BookSlot).await;
    tokio::time::sleep(Duration::from_millis(10)).await;

    let texts = h.messenger.texts_for(CHAT);
    assert_eq!(texts[0], notice::BOOKING_STARTED);
    assert_eq!(texts[1], notice::SLOT_BOOKED);
    assert_eq!(h.booker.attempts(), 1);
}

#[tokio::test]
async fn failed_preamble_is_reported_once_and_swallowed() {
    let messenger = Arc::new(RecordingMessenger::failing());
    let supply = Arc::new(FakeSupply::default());
    let monitors = Arc::new(MonitorManager::new(
        supply.clone(),
        messenger.clone(),
        MonitorConfig::default(),
    ));
    let booking = Arc::new(BookingService::new(
        Arc::new(ScriptedBooker::new(Vec::new())),
        messenger.clone(),
        Duration::from_secs(10),
    ));
    let control = TelegramControl::new(
        messenger.clone(),
        supply,
        Arc::new(FakeAnalytics::new()),
        monitors,
        booking,
        SlotCheck::from_config(&SlotCheckConfig::default()),
    );

    // Must return normally even though nothing can be delivered
    control.execute(CHAT, TelegramCommand::Adverts).await;
    assert!(messenger.sent().is_empty());
}
