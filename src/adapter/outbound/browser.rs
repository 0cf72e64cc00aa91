//! Slot booker that shells out to the browser-automation script.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::BookingError;
use crate::infrastructure::config::booking::BookingConfig;
use crate::port::SlotBooker;

/// Runs `program args... cookies_path` once per attempt.
///
/// Exit status 0 means a slot was booked. The child is killed if the
/// attempt is dropped (for example when the booking task is aborted).
#[derive(Debug, Clone)]
pub struct ScriptBooker {
    program: String,
    args: Vec<String>,
    cookies_path: PathBuf,
}

impl ScriptBooker {
    #[must_use]
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        cookies_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            cookies_path: cookies_path.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &BookingConfig) -> Self {
        Self::new(
            config.program.clone(),
            config.args.clone(),
            config.cookies_path.clone(),
        )
    }
}

#[async_trait]
impl SlotBooker for ScriptBooker {
    async fn try_book(&self) -> Result<bool, BookingError> {
        debug!(program = %self.program, "Launching slot booker");

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&self.cookies_path)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(BookingError::Launch)?;

        match status.code() {
            Some(0) => Ok(true),
            Some(code) => {
                info!(code, "Slot booker finished without booking");
                Ok(false)
            }
            None => Err(BookingError::Killed),
        }
    }
}
