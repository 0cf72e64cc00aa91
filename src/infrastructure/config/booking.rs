//! Slot booking configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// External browser-automation program and retry cadence.
///
/// The program is launched once per attempt with `args` followed by the
/// cookie file path; exit status 0 means a slot was booked.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    #[serde(default = "default_cookies_path")]
    pub cookies_path: PathBuf,
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

fn default_program() -> String {
    "python3".into()
}

fn default_args() -> Vec<String> {
    vec!["slot_browser_booker.py".into()]
}

fn default_cookies_path() -> PathBuf {
    PathBuf::from("cookies.txt")
}

const fn default_retry_delay_secs() -> u64 {
    10
}

impl BookingConfig {
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            cookies_path: default_cookies_path(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }
}
