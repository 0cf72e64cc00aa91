//! Telegram command parsing.

/// Supported Telegram commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelegramCommand {
    Start,
    Help,
    /// Start (or restart) this chat's periodic coefficient monitor.
    MonitorCoefficients,
    /// One-shot slot window check.
    CheckSlots,
    HiddenProducts,
    SearchQueries,
    KeywordStats,
    SalesFunnel,
    CreateReport,
    Adverts,
    BookSlot,
}

/// Parse error for Telegram command messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
    /// Addressed as `/command@name` to a bot other than this one.
    OtherBot(String),
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "сообщение не является командой"),
            Self::UnknownCommand(cmd) => write!(f, "неизвестная команда `{cmd}`"),
            Self::OtherBot(name) => write!(f, "команда адресована боту @{name}"),
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Parse a Telegram message into a bot command.
///
/// Only the first word counts. A trailing `@name` must match `bot_username`
/// (case-insensitively) when it is known; otherwise the message belongs to
/// another bot in the same group.
pub fn parse_command(
    text: &str,
    bot_username: Option<&str>,
) -> Result<TelegramCommand, CommandParseError> {
    let Some(raw_command) = text.split_whitespace().next() else {
        return Err(CommandParseError::NotACommand);
    };
    if !raw_command.starts_with('/') {
        return Err(CommandParseError::NotACommand);
    }

    let command = match raw_command.split_once('@') {
        Some((head, mention)) => {
            if let Some(me) = bot_username {
                if !mention.eq_ignore_ascii_case(me) {
                    return Err(CommandParseError::OtherBot(mention.to_string()));
                }
            }
            head
        }
        None => raw_command,
    };

    match command {
        "/start" => Ok(TelegramCommand::Start),
        "/help" => Ok(TelegramCommand::Help),
        "/get_acceptance_coefficients" => Ok(TelegramCommand::MonitorCoefficients),
        "/activate_monitoring" | "/check_target_warehouse_with_low_coefficients" => {
            Ok(TelegramCommand::CheckSlots)
        }
        "/check_hidden_products" => Ok(TelegramCommand::HiddenProducts),
        "/getting_product_search_queries" => Ok(TelegramCommand::SearchQueries),
        "/getting_keyword_statistics" => Ok(TelegramCommand::KeywordStats),
        "/get_sales_funnel" => Ok(TelegramCommand::SalesFunnel),
        "/create_report" => Ok(TelegramCommand::CreateReport),
        "/get_adverts" => Ok(TelegramCommand::Adverts),
        "/bookslot" => Ok(TelegramCommand::BookSlot),
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

/// Help text returned by `/start` and `/help`.
#[must_use]
pub const fn command_help() -> &'static str {
    "Привет, это бот\n\n\
    📋 Команды\n\n\
    /get_acceptance_coefficients - 🔔 Мониторинг коэффициентов приемки\n\
    /activate_monitoring - 🏭 Проверить целевой склад\n\
    /check_target_warehouse_with_low_coefficients - 🏭 Проверить целевой склад\n\
    /check_hidden_products - 🙈 Скрытые карточки\n\
    /getting_product_search_queries - 🔎 Поисковые запросы\n\
    /getting_keyword_statistics - 🔑 Статистика по ключевым фразам\n\
    /get_sales_funnel - 📈 Воронка продаж\n\
    /create_report - 📄 Создать отчет\n\
    /get_adverts - 📢 Рекламные кампании\n\
    /bookslot - 📦 Бронировать слот"
}

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("get_acceptance_coefficients", "Мониторинг коэффициентов приемки"),
        ("activate_monitoring", "Проверить целевой склад"),
        (
            "check_target_warehouse_with_low_coefficients",
            "Проверить целевой склад",
        ),
        ("check_hidden_products", "Скрытые карточки"),
        ("getting_product_search_queries", "Поисковые запросы"),
        ("getting_keyword_statistics", "Статистика по ключевым фразам"),
        ("get_sales_funnel", "Воронка продаж"),
        ("create_report", "Создать отчет"),
        ("get_adverts", "Рекламные кампании"),
        ("bookslot", "Бронировать слот"),
        ("help", "Список команд"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_every_command() {
        let cases = [
            ("/start", TelegramCommand::Start),
            ("/help", TelegramCommand::Help),
            ("/get_acceptance_coefficients", TelegramCommand::MonitorCoefficients),
            ("/activate_monitoring", TelegramCommand::CheckSlots),
            (
                "/check_target_warehouse_with_low_coefficients",
                TelegramCommand::CheckSlots,
            ),
            ("/check_hidden_products", TelegramCommand::HiddenProducts),
            ("/getting_product_search_queries", TelegramCommand::SearchQueries),
            ("/getting_keyword_statistics", TelegramCommand::KeywordStats),
            ("/get_sales_funnel", TelegramCommand::SalesFunnel),
            ("/create_report", TelegramCommand::CreateReport),
            ("/get_adverts", TelegramCommand::Adverts),
            ("/bookslot", TelegramCommand::BookSlot),
        ];
        for (text, expected) in cases {
            assert_eq!(parse_command(text, None).unwrap(), expected, "{text}");
        }
    }

    #[test]
    fn parse_command_with_bot_mention() {
        assert_eq!(
            parse_command("/bookslot@wb_slot_bot", Some("wb_slot_bot")).unwrap(),
            TelegramCommand::BookSlot
        );
        assert_eq!(
            parse_command("/help@WB_Slot_Bot", Some("wb_slot_bot")).unwrap(),
            TelegramCommand::Help
        );
        assert_eq!(
            parse_command("/help@anybot", None).unwrap(),
            TelegramCommand::Help
        );
    }

    #[test]
    fn commands_for_other_bots_are_not_ours() {
        assert_eq!(
            parse_command("/start@some_other_bot", Some("wb_slot_bot")),
            Err(CommandParseError::OtherBot("some_other_bot".into()))
        );
        assert_eq!(
            parse_command("/foo@other_bot", Some("wb_slot_bot")),
            Err(CommandParseError::OtherBot("other_bot".into()))
        );
    }

    #[test]
    fn trailing_words_are_ignored() {
        assert_eq!(
            parse_command("  /get_adverts please  ", None).unwrap(),
            TelegramCommand::Adverts
        );
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse_command("hello", None), Err(CommandParseError::NotACommand));
        assert_eq!(parse_command("", None), Err(CommandParseError::NotACommand));
        assert_eq!(parse_command("   ", None), Err(CommandParseError::NotACommand));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse_command("/stop", None),
            Err(CommandParseError::UnknownCommand("/stop".into()))
        );
        assert_eq!(
            parse_command("/stop@bot", Some("bot")).unwrap_err().to_string(),
            "неизвестная команда `/stop`"
        );
    }

    #[test]
    fn menu_and_help_agree() {
        let help = command_help();
        for (command, _) in bot_commands() {
            if command != "help" {
                assert!(help.contains(&format!("/{command} ")), "{command} missing from help");
            }
            assert!(parse_command(&format!("/{command}"), None).is_ok());
        }
    }
}
