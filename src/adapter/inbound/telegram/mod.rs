//! Telegram command handling.
//!
//! Parses inbound messages into commands, filters them by chat, and runs
//! them against the application services.

mod auth;
mod command;

pub mod control;
pub mod listener;

pub use auth::{dispatch_for_message, Dispatch};
pub use command::{bot_commands, command_help, parse_command, CommandParseError, TelegramCommand};
pub use control::TelegramControl;
pub use listener::run_command_listener;
