//! The async logger interface

use crate::level::LogLevel;
use async_trait::async_trait;
use uuid::Uuid;

/// Asynchronous, fire-and-forget logging sink.
///
/// Every method accepts a free-text correlation id used to group related
/// operations; pass `""` when no correlation applies. Implementations must
/// never surface their own failures to the caller.
#[async_trait]
pub trait Logger: Send + Sync {
    async fn log_debug(&self, message: &str, correlation_id: &str);
    async fn log_info(&self, message: &str, correlation_id: &str);
    async fn log_warning(&self, message: &str, correlation_id: &str);
    async fn log_error(&self, message: &str, source: Option<&str>, correlation_id: &str);
    async fn log_request(&self, message: &str, correlation_id: &str);

    fn level(&self) -> LogLevel;
    fn set_level(&self, level: LogLevel);
}

/// Generate a fresh correlation id (UUIDv7, time-ordered).
pub fn new_correlation_id() -> String {
    Uuid::now_v7().to_string()
}

/// Render the standard entry header: timestamp, level, correlation tag.
pub(crate) fn entry_header(level: LogLevel, correlation_id: &str) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    if correlation_id.is_empty() {
        format!("{} [{}]", timestamp, level)
    } else {
        format!("{} [{}] [{}]", timestamp, level, correlation_id)
    }
}

/// Strip non-printable characters from request payloads before logging.
pub(crate) fn clean_non_printable(message: &str) -> String {
    message
        .chars()
        .filter(|c| !c.is_control() || *c == ' ')
        .collect()
}
