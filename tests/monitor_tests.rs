//! Chat-level flows: inbound text through dispatch, control and the
//! background monitors, observed through the recording messenger.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;
use slotwatch::adapter::inbound::telegram::{dispatch_for_message, Dispatch, TelegramControl};
use slotwatch::application::{BookingService, MonitorManager, SlotCheck};
use slotwatch::domain::ConversationId;
use slotwatch::error::ApiError;
use slotwatch::infrastructure::config::monitor::{MonitorConfig, SlotCheckConfig};
use slotwatch::testkit::booker::ScriptedBooker;
use slotwatch::testkit::domain::coefficient;
use slotwatch::testkit::marketplace::{FakeAnalytics, FakeSupply};
use slotwatch::testkit::messenger::RecordingMessenger;

const ALICE: ConversationId = ConversationId::new(1001);
const BOB: ConversationId = ConversationId::new(1002);

struct Bot {
    control: TelegramControl,
    messenger: Arc<RecordingMessenger>,
    supply: Arc<FakeSupply>,
    monitors: Arc<MonitorManager>,
}

impl Bot {
    fn new(supply: FakeSupply) -> Self {
        let supply = Arc::new(supply);
        let messenger = Arc::new(RecordingMessenger::new());
        let monitors = Arc::new(MonitorManager::new(
            supply.clone(),
            messenger.clone(),
            MonitorConfig::default(),
        ));
        let booking = Arc::new(BookingService::new(
            Arc::new(ScriptedBooker::new(vec![Ok(false), Ok(true)])),
            messenger.clone(),
            Duration::from_secs(10),
        ));
        let control = TelegramControl::new(
            messenger.clone(),
            supply.clone(),
            Arc::new(FakeAnalytics::new()),
            monitors.clone(),
            booking,
            SlotCheck::from_config(&SlotCheckConfig::default()),
        );
        Self {
            control,
            messenger,
            supply,
            monitors,
        }
    }

    async fn receive(&self, chat: ConversationId, text: &str) {
        match dispatch_for_message(text, chat, &[], Some("slotwatch_bot")) {
            Dispatch::Ignore => {}
            Dispatch::Execute(command) => self.control.execute(chat, command).await,
            Dispatch::Reject(reply) => self.control.reply(chat, &reply).await.unwrap(),
        }
    }

    fn alerts(&self, chat: ConversationId) -> usize {
        self.messenger
            .texts_for(chat)
            .iter()
            .filter(|t| t.starts_with("Склад:"))
            .count()
    }
}

fn cheap_tula() -> FakeSupply {
    FakeSupply::with_records(vec![coefficient(206348, dec!(1), "Короба")])
}

#[tokio::test(start_paused = true)]
async fn each_chat_gets_its_own_monitor() {
    let bot = Bot::new(cheap_tula());

    bot.receive(ALICE, "/get_acceptance_coefficients").await;
    bot.receive(BOB, "/get_acceptance_coefficients@slotwatch_bot").await;
    tokio::time::sleep(Duration::from_secs(13)).await;

    assert_eq!(bot.monitors.active_count(), 2);
    // t = 0 and t = 12 for both
    assert_eq!(bot.alerts(ALICE), 2);
    assert_eq!(bot.alerts(BOB), 2);

    bot.monitors.shutdown();
}

#[tokio::test(start_paused = true)]
async fn restarting_one_chat_leaves_the_other_alone() {
    let bot = Bot::new(cheap_tula());

    bot.receive(ALICE, "/get_acceptance_coefficients").await;
    bot.receive(BOB, "/get_acceptance_coefficients").await;
    tokio::task::yield_now().await;

    bot.receive(ALICE, "/get_acceptance_coefficients").await;
    tokio::time::sleep(Duration::from_secs(30)).await;

    assert_eq!(bot.monitors.active_count(), 2);
    let announcements = |chat| {
        bot.messenger
            .texts_for(chat)
            .iter()
            .filter(|t| t.starts_with("✅ Запущен мониторинг"))
            .count()
    };
    assert_eq!(announcements(ALICE), 2);
    assert_eq!(announcements(BOB), 1);
    // Bob: t = 0, 12, 24
    assert_eq!(bot.alerts(BOB), 3);

    bot.monitors.shutdown();
}

#[tokio::test(start_paused = true)]
async fn api_failure_delays_the_next_cycle() {
    let supply = cheap_tula();
    supply.push_error(ApiError::RateLimited);
    let bot = Bot::new(supply);

    bot.receive(ALICE, "/get_acceptance_coefficients").await;
    tokio::time::sleep(Duration::from_secs(29)).await;
    assert_eq!(bot.alerts(ALICE), 0);
    assert_eq!(bot.supply.coefficient_calls(), 1);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(bot.alerts(ALICE), 1);

    bot.monitors.shutdown();
}

#[tokio::test]
async fn unknown_command_replies_with_help() {
    let bot = Bot::new(FakeSupply::default());

    bot.receive(ALICE, "/stop").await;
    bot.receive(ALICE, "просто текст").await;

    let texts = bot.messenger.texts_for(ALICE);
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("Ошибка: неизвестная команда `/stop`"));
    assert_eq!(bot.monitors.active_count(), 0);
}

#[tokio::test]
async fn group_commands_for_other_bots_are_ignored() {
    let bot = Bot::new(cheap_tula());

    bot.receive(ALICE, "/get_acceptance_coefficients@some_other_bot").await;
    bot.receive(ALICE, "/foo@some_other_bot").await;

    assert!(bot.messenger.texts_for(ALICE).is_empty());
    assert_eq!(bot.monitors.active_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn bookslot_retries_until_booked() {
    let bot = Bot::new(FakeSupply::default());

    bot.receive(ALICE, "/bookslot").await;
    tokio::time::sleep(Duration::from_secs(11)).await;

    let texts = bot.messenger.texts_for(ALICE);
    assert_eq!(
        texts,
        vec![
            "🔄 Запускаю попытки брони слота...".to_string(),
            "✅ Слот успешно забронирован!".to_string(),
        ]
    );
}
