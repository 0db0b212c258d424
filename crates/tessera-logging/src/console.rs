//! Console sink
//!
//! Forwards entries to the process-wide `tracing` subscriber, so console
//! output follows whatever profile `init` configured.

use crate::level::LogLevel;
use crate::logger::{clean_non_printable, Logger};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU8, Ordering};

/// Logger that emits `tracing` events.
pub struct ConsoleLogger {
    level: AtomicU8,
}

impl ConsoleLogger {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level: AtomicU8::new(level.as_u8()),
        }
    }

    fn enabled(&self, message_level: LogLevel) -> bool {
        message_level >= self.level()
    }
}

#[async_trait]
impl Logger for ConsoleLogger {
    async fn log_debug(&self, message: &str, correlation_id: &str) {
        if self.enabled(LogLevel::Debug) {
            tracing::debug!(correlation_id, "{}", message);
        }
    }

    async fn log_info(&self, message: &str, correlation_id: &str) {
        if self.enabled(LogLevel::Info) {
            tracing::info!(correlation_id, "{}", message);
        }
    }

    async fn log_warning(&self, message: &str, correlation_id: &str) {
        if self.enabled(LogLevel::Warning) {
            tracing::warn!(correlation_id, "{}", message);
        }
    }

    async fn log_error(&self, message: &str, source: Option<&str>, correlation_id: &str) {
        if self.enabled(LogLevel::Error) {
            tracing::error!(correlation_id, source, "{}", message);
        }
    }

    async fn log_request(&self, message: &str, correlation_id: &str) {
        if self.enabled(LogLevel::Request) {
            tracing::info!(
                correlation_id,
                kind = "request",
                "{}",
                clean_non_printable(message)
            );
        }
    }

    fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    fn set_level(&self, level: LogLevel) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
    }
}
