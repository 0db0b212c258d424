//! File sink
//!
//! Appends log entries to a dated file. Writes are serialized behind an
//! async mutex and every I/O failure is swallowed: a broken log file must
//! never fail the operation being logged.

use crate::level::LogLevel;
use crate::logger::{clean_non_printable, entry_header, Logger};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Logger that appends UTF-8 lines to a single file.
pub struct FileLogger {
    level: AtomicU8,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileLogger {
    /// Create a file logger writing to `path`, creating parent directories.
    pub fn new(level: LogLevel, path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }

        Ok(Self {
            level: AtomicU8::new(level.as_u8()),
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Create a file logger using the default dated path under `logs/`,
    /// named after the current executable.
    pub fn with_default_path(level: LogLevel) -> std::io::Result<Self> {
        Self::new(level, default_log_path())
    }

    /// The file this logger appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append(&self, message_level: LogLevel, message: &str, correlation_id: &str) {
        if message_level < self.level() {
            return;
        }

        let line = format!(
            "{} {}\n",
            entry_header(message_level, correlation_id),
            message
        );

        let _guard = self.write_lock.lock().await;
        // Failures are intentionally dropped
        let _ = self.try_write(line.as_bytes()).await;
    }

    async fn try_write(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await
    }
}

fn default_log_path() -> PathBuf {
    let exe_name = std::env::current_exe()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "unknown".to_string());
    let date = chrono::Local::now().format("%d_%m_%Y");

    PathBuf::from("logs").join(format!("{}_{}.log", date, exe_name))
}

#[async_trait]
impl Logger for FileLogger {
    async fn log_debug(&self, message: &str, correlation_id: &str) {
        self.append(LogLevel::Debug, message, correlation_id).await;
    }

    async fn log_info(&self, message: &str, correlation_id: &str) {
        self.append(LogLevel::Info, message, correlation_id).await;
    }

    async fn log_warning(&self, message: &str, correlation_id: &str) {
        self.append(LogLevel::Warning, message, correlation_id).await;
    }

    async fn log_error(&self, message: &str, source: Option<&str>, correlation_id: &str) {
        let full = match source {
            Some(src) => format!("{} {}", message, src),
            None => message.to_string(),
        };
        self.append(LogLevel::Error, &full, correlation_id).await;
    }

    async fn log_request(&self, message: &str, correlation_id: &str) {
        self.append(LogLevel::Request, &clean_non_printable(message), correlation_id)
            .await;
    }

    fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    fn set_level(&self, level: LogLevel) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
    }
}
