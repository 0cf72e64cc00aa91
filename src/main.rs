use clap::Parser;
use slotwatch::adapter::inbound::cli::Cli;
use slotwatch::app::App;
use slotwatch::infrastructure::config::settings::Config;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config {}: {e}", cli.config.display());
            std::process::exit(1);
        }
    };

    if cli.check_config {
        println!("Configuration OK: {}", cli.config.display());
        return;
    }

    if let Err(e) = config.bot_token() {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let _log_guard = config.init_logging();
    info!("slotwatch starting");

    tokio::select! {
        () = run_with_restart(&config) => {}
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("slotwatch stopped");
}

/// Restart the service after failures until it stops cleanly.
async fn run_with_restart(config: &Config) {
    loop {
        match App::run(config).await {
            Ok(()) => return,
            Err(e) => {
                error!(
                    error = %e,
                    delay_secs = config.restart_delay_secs,
                    "Service failed, restarting"
                );
                tokio::time::sleep(config.restart_delay()).await;
            }
        }
    }
}
