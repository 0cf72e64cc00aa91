//! Logging configuration and initialization.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Local};
use rolling_file::{RollingCondition, RollingFileAppender};
use serde::Deserialize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
    /// Size-capped error log, written to `logs/bot_errors.log` unless
    /// overridden.
    #[serde(default = "default_file")]
    pub file: Option<LogFileConfig>,
}

/// Rotating error-log file settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LogFileConfig {
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,
    /// File name without the `.log` extension.
    #[serde(default = "default_log_prefix")]
    pub prefix: String,
    /// Rotated backups (`.log.1` ... `.log.N`) kept next to the active file.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
    /// Size limit of every file, in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

fn default_level() -> String {
    "info".into()
}

fn default_format() -> String {
    "pretty".into()
}

fn default_log_directory() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_prefix() -> String {
    "bot_errors".into()
}

const fn default_max_files() -> usize {
    10
}

const fn default_max_bytes() -> u64 {
    200_000
}

#[allow(clippy::unnecessary_wraps)]
fn default_file() -> Option<LogFileConfig> {
    Some(LogFileConfig::default())
}

impl Default for LogFileConfig {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            prefix: default_log_prefix(),
            max_files: default_max_files(),
            max_bytes: default_max_bytes(),
        }
    }
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// The console receives everything allowed by `RUST_LOG` (or the
    /// configured level); the file receives errors only. The returned guard
    /// flushes the file writer on drop and must be held for the lifetime of
    /// the process.
    pub fn init(&self) -> Option<WorkerGuard> {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

        match self.format.as_str() {
            "json" => layers.push(fmt::layer().json().with_filter(filter).boxed()),
            _ => layers.push(fmt::layer().with_filter(filter).boxed()),
        }

        let guard = self.file.as_ref().and_then(|file| match SizeCappedLog::open(file) {
            Ok(log) => {
                let (writer, guard) = tracing_appender::non_blocking(log);
                layers.push(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_filter(LevelFilter::ERROR)
                        .boxed(),
                );
                Some(guard)
            }
            Err(e) => {
                eprintln!(
                    "Warning: could not open log file in {} ({e}), file logging disabled",
                    file.directory.display()
                );
                None
            }
        });

        tracing_subscriber::registry().with(layers).init();

        guard
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            file: default_file(),
        }
    }
}

/// Rolls over before a write that would push the active file past the cap.
#[derive(Debug)]
struct SizeLimit {
    max_bytes: u64,
    /// Length of the write about to happen, set by [`SizeCappedLog`].
    incoming: Arc<AtomicU64>,
}

impl RollingCondition for SizeLimit {
    fn should_rollover(&mut self, _now: &DateTime<Local>, current_filesize: u64) -> bool {
        current_filesize > 0
            && current_filesize + self.incoming.load(Ordering::Relaxed) > self.max_bytes
    }
}

/// Error log writer: `{prefix}.log` plus up to `max_files` numbered backups,
/// none of them larger than `max_bytes` (a single oversized event still gets
/// a file of its own).
pub struct SizeCappedLog {
    appender: RollingFileAppender<SizeLimit>,
    incoming: Arc<AtomicU64>,
}

impl SizeCappedLog {
    /// Open (or continue) the active log file, creating the directory.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the directory or file cannot be created.
    pub fn open(config: &LogFileConfig) -> io::Result<Self> {
        std::fs::create_dir_all(&config.directory)?;

        let incoming = Arc::new(AtomicU64::new(0));
        let condition = SizeLimit {
            max_bytes: config.max_bytes,
            incoming: Arc::clone(&incoming),
        };
        let path = config.directory.join(format!("{}.log", config.prefix));
        let appender = RollingFileAppender::new(path, condition, config.max_files)?;

        Ok(Self { appender, incoming })
    }
}

impl Write for SizeCappedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.incoming.store(buf.len() as u64, Ordering::Relaxed);
        self.appender.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.appender.flush()
    }
}
