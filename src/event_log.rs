//! Append-only event log files.
//!
//! [`EventLog`] is the logging sink the services write audit lines to. Every
//! call emits a debug-level `tracing` event; when a log directory is
//! configured the line is also appended to the named file as
//! `yyyyMMdd\tHH:mm:ss\t<uuid>\t<message>`.

use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

/// File receiving one line per HTTP request.
pub const REQUEST_LOG: &str = "reqLog.txt";
/// File receiving fun-fact mutations.
pub const FUNFACT_LOG: &str = "funfactLog.txt";
/// File receiving server errors.
pub const ERROR_LOG: &str = "errorLog.txt";

/// Logging sink accepting `(message, file_name)` pairs.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    dir: Option<PathBuf>,
}

impl EventLog {
    /// Creates a sink writing files under `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Creates a sink that only emits tracing events.
    pub fn disabled() -> Self {
        Self { dir: None }
    }

    /// The directory log files are written to, if any.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Records a message in the named log file.
    ///
    /// Write failures are reported through `tracing` and otherwise ignored;
    /// a request never fails because its log line could not be written.
    pub async fn record(&self, message: &str, file_name: &str) {
        debug!(log_file = file_name, "{message}");

        let Some(dir) = &self.dir else {
            return;
        };
        let line = format_line(message);
        if let Err(err) = append(dir, file_name, &line).await {
            warn!(
                log_file = file_name,
                error = %err,
                "Failed to write event log"
            );
        }
    }
}

fn format_line(message: &str) -> String {
    let timestamp = Local::now().format("%Y%m%d\t%H:%M:%S");
    format!("{timestamp}\t{}\t{message}\n", Uuid::new_v4())
}

async fn append(dir: &Path, file_name: &str, line: &str) -> std::io::Result<()> {
    fs::create_dir_all(dir).await?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(file_name))
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await
}
