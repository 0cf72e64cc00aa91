//! Command-line interface definitions.

use std::path::PathBuf;

use clap::Parser;

/// Telegram bot for Wildberries warehouse slots and seller analytics
#[derive(Parser, Debug)]
#[command(name = "slotwatch")]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Validate configuration and exit
    #[arg(long)]
    pub check_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_config_toml() {
        let cli = Cli::parse_from(["slotwatch"]);
        assert_eq!(cli.config, PathBuf::from("config.toml"));
        assert!(!cli.check_config);
    }

    #[test]
    fn accepts_custom_path() {
        let cli = Cli::parse_from([
            "slotwatch",
            "--config",
            "/etc/slotwatch.toml",
            "--check-config",
        ]);
        assert_eq!(cli.config, PathBuf::from("/etc/slotwatch.toml"));
        assert!(cli.check_config);
    }
}
