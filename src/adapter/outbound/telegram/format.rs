//! Message formatting for Telegram replies.
//!
//! This is the only place where API failures and analytics payloads turn
//! into user-facing text.

use serde_json::{Map, Value};

use crate::domain::{Advert, CoefficientRecord, HiddenProduct, ReportTicket};
use crate::error::{ApiError, Error, ForbiddenBody};
use crate::port::OutboundMessage;

/// Telegram rejects messages above 4096 characters; stay well below.
pub const MESSAGE_LIMIT: usize = 4000;

/// "```\n" + "\n```"
const FENCE_OVERHEAD: usize = 8;

pub const FUNNEL_EMPTY: &str = "Данные по воронке продаж не найдены.";

/// Key translations applied to sales funnel payloads.
pub const FUNNEL_KEYS: &[(&str, &str)] = &[
    ("brandNames", "Бренды"),
    ("objectIDs", "ID предметов"),
    ("tagIDs", "ID ярлыков"),
    ("nmIDs", "Артикулы Wildberries"),
    ("timezone", "Временная зона"),
    ("period", "Период"),
    ("orderBy", "Сортировка"),
    ("page", "Страница"),
    ("openCardCount", "Переходы в карточку товара"),
    ("addToCartCount", "Добавления в корзину"),
    ("addToCart", "Добавления в корзину"),
    ("ordersCount", "Количество заказов"),
    ("orders", "Количество заказов"),
    ("avgRubPrice", "Средняя цена (₽)"),
    ("ordersSumRub", "Сумма заказов (₽)"),
    ("stockMpQty", "Остатки на маркетплейсе (шт.)"),
    ("stockWbQty", "Остатки на складе (шт.)"),
    ("cancelSumRub", "Сумма возвратов (₽)"),
    ("cancelCount", "Количество возвратов"),
    ("buyoutsCount", "Количество выкупов"),
    ("buyoutCount", "Количество выкупов"),
    ("buyoutsSumRub", "Сумма выкупов (₽)"),
    ("buyoutSumRub", "Сумма выкупов (₽)"),
    ("brandName", "Название бренда"),
    ("nmID", "Артикул"),
    ("vendorCode", "Артикул поставщика"),
];

/// Split text into chunks of at most `limit` characters.
///
/// Chunks break after the last newline inside the window when there is one,
/// otherwise exactly at the limit. Concatenating the chunks yields the input.
#[must_use]
pub fn split_chunks(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let Some((window_end, _)) = rest.char_indices().nth(limit) else {
            chunks.push(rest.to_string());
            break;
        };

        let split_at = rest[..window_end]
            .rfind('\n')
            .map_or(window_end, |newline| newline + 1);
        let (head, tail) = rest.split_at(split_at);
        chunks.push(head.to_string());
        rest = tail;
    }

    chunks
}

/// Escape special characters for Telegram `MarkdownV2`.
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

/// Escape text placed inside a `MarkdownV2` code block, where only the
/// backtick and backslash are reserved.
#[must_use]
pub fn escape_code(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '`' || c == '\\' {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// Wrap text in `MarkdownV2` code blocks, one block per message.
///
/// Each raw piece is at most half the available space, so the escaped block
/// always fits in [`MESSAGE_LIMIT`].
#[must_use]
pub fn code_block_chunks(body: &str) -> Vec<String> {
    let raw_budget = (MESSAGE_LIMIT - FENCE_OVERHEAD) / 2;
    split_chunks(body, raw_budget)
        .into_iter()
        .map(|piece| format!("```\n{}\n```", escape_code(&piece)))
        .collect()
}

/// User-facing text for an API failure.
#[must_use]
pub fn render_api_error(error: &ApiError) -> String {
    match error {
        ApiError::BadRequest { body } => format!("Неправильный запрос: {body}"),
        ApiError::Unauthorized => "Пользователь не авторизован".to_string(),
        ApiError::Forbidden(ForbiddenBody::Structured {
            title,
            detail,
            request_id,
            origin,
        }) => format!(
            "Доступ запрещен. Заголовок ошибки: {title}, Детали ошибки: {detail}, \
            Уникальный ID запроса: {request_id}, ID внутреннего сервиса WB: {origin}"
        ),
        ApiError::Forbidden(ForbiddenBody::Raw(body)) => format!("Доступ запрещен: {body}"),
        ApiError::RateLimited => "Слишком много запросов".to_string(),
        ApiError::Unexpected { status, body } => format!("Произошла ошибка: {status} - {body}"),
        ApiError::Transport(e) => format!("Ошибка при получении данных: {e}"),
        ApiError::Decode(e) => format!("Ошибка при получении данных: {e}"),
    }
}

/// Reply for a command handler that failed.
#[must_use]
pub fn render_failure(error: &Error) -> String {
    match error {
        Error::Api(api) => render_api_error(api),
        other => format!("Произошла ошибка: {other}"),
    }
}

#[must_use]
pub fn hidden_products_report(products: &[HiddenProduct]) -> String {
    if products.is_empty() {
        return "Скрытых товаров не найдено.".to_string();
    }
    let mut msg = String::from("Список скрытых товаров:\n");
    for product in products {
        msg.push_str(&format!("ID: {}, Название: {}\n", product.id, product.name));
    }
    msg
}

#[must_use]
pub fn adverts_report(adverts: &[Advert]) -> String {
    if adverts.is_empty() {
        return "У вас нет активных рекламных кампаний.".to_string();
    }
    let lines: Vec<String> = adverts
        .iter()
        .map(|a| format!("📢 {} (ID: {})", a.name, a.id))
        .collect();
    format!("Кампании:\n{}", lines.join("\n"))
}

/// Result of the one-shot availability check.
#[must_use]
pub fn slot_check_report(records: &[CoefficientRecord]) -> String {
    if records.is_empty() {
        return "Подходящих слотов не найдено.".to_string();
    }
    let mut msg = format!("Найдено слотов: {}\n", records.len());
    for record in records {
        msg.push_str(&format!(
            "\nСклад: {} (ID {})\nКоэффициент: {}, Дата начала: {}, Тип поставки: {}\n",
            record.warehouse_name,
            record.warehouse_id,
            record.coefficient.normalize(),
            record.display_date(),
            record.box_type_name,
        ));
    }
    msg
}

/// Pretty-printed JSON, or a short note when there is nothing to show.
#[must_use]
pub fn json_report(value: &Value) -> String {
    if is_empty_payload(value) {
        return "Нет данных.".to_string();
    }
    pretty(value)
}

#[must_use]
pub fn report_ticket(ticket: &ReportTicket) -> String {
    let mut msg = format!("Отчет {} отправлен на генерацию.", ticket.id);
    if !is_empty_payload(&ticket.response) {
        msg.push('\n');
        msg.push_str(&pretty(&ticket.response));
    }
    msg
}

/// Recursively replace object keys found in [`FUNNEL_KEYS`].
#[must_use]
pub fn translate_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (translate_key(&key), translate_keys(inner)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(translate_keys).collect()),
        other => other,
    }
}

fn translate_key(key: &str) -> String {
    FUNNEL_KEYS
        .iter()
        .find(|(from, _)| *from == key)
        .map_or_else(|| key.to_string(), |(_, to)| (*to).to_string())
}

/// Sales funnel reply: translated, pretty-printed, fenced and chunked.
#[must_use]
pub fn sales_funnel_messages(funnel: &Value) -> Vec<OutboundMessage> {
    if is_empty_payload(funnel) {
        return vec![OutboundMessage::plain(FUNNEL_EMPTY)];
    }
    let body = pretty(&translate_keys(funnel.clone()));
    code_block_chunks(&body)
        .into_iter()
        .map(OutboundMessage::markdown)
        .collect()
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
