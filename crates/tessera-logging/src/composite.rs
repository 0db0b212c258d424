//! Composite sink
//!
//! Fans each entry out to every child sink concurrently.

use crate::level::LogLevel;
use crate::logger::Logger;
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;

/// Logger forwarding every entry to a set of child sinks.
///
/// The level getter reads the first child; the setter broadcasts.
pub struct CompositeLogger {
    sinks: Vec<Arc<dyn Logger>>,
}

impl CompositeLogger {
    pub fn new(sinks: Vec<Arc<dyn Logger>>) -> Self {
        Self { sinks }
    }
}

#[async_trait]
impl Logger for CompositeLogger {
    async fn log_debug(&self, message: &str, correlation_id: &str) {
        join_all(
            self.sinks
                .iter()
                .map(|s| s.log_debug(message, correlation_id)),
        )
        .await;
    }

    async fn log_info(&self, message: &str, correlation_id: &str) {
        join_all(
            self.sinks
                .iter()
                .map(|s| s.log_info(message, correlation_id)),
        )
        .await;
    }

    async fn log_warning(&self, message: &str, correlation_id: &str) {
        join_all(
            self.sinks
                .iter()
                .map(|s| s.log_warning(message, correlation_id)),
        )
        .await;
    }

    async fn log_error(&self, message: &str, source: Option<&str>, correlation_id: &str) {
        join_all(
            self.sinks
                .iter()
                .map(|s| s.log_error(message, source, correlation_id)),
        )
        .await;
    }

    async fn log_request(&self, message: &str, correlation_id: &str) {
        join_all(
            self.sinks
                .iter()
                .map(|s| s.log_request(message, correlation_id)),
        )
        .await;
    }

    fn level(&self) -> LogLevel {
        self.sinks
            .first()
            .map(|s| s.level())
            .unwrap_or(LogLevel::Debug)
    }

    fn set_level(&self, level: LogLevel) {
        for sink in &self.sinks {
            sink.set_level(level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileLogger;

    #[tokio::test]
    async fn test_fan_out_reaches_every_sink() {
        let dir = tempfile::tempdir().unwrap();
        let first = Arc::new(FileLogger::new(LogLevel::Debug, dir.path().join("a.log")).unwrap());
        let second = Arc::new(FileLogger::new(LogLevel::Debug, dir.path().join("b.log")).unwrap());

        let composite = CompositeLogger::new(vec![first.clone(), second.clone()]);
        composite.log_info("fan out", "corr-9").await;

        for logger in [first, second] {
            let contents = std::fs::read_to_string(logger.path()).unwrap();
            assert!(contents.contains("fan out"));
            assert!(contents.contains("[corr-9]"));
        }
    }

    #[tokio::test]
    async fn test_set_level_broadcasts() {
        let dir = tempfile::tempdir().unwrap();
        let first = Arc::new(FileLogger::new(LogLevel::Debug, dir.path().join("a.log")).unwrap());
        let second = Arc::new(FileLogger::new(LogLevel::Info, dir.path().join("b.log")).unwrap());

        let composite = CompositeLogger::new(vec![first.clone(), second.clone()]);
        composite.set_level(LogLevel::Error);

        assert_eq!(first.level(), LogLevel::Error);
        assert_eq!(second.level(), LogLevel::Error);
        assert_eq!(composite.level(), LogLevel::Error);
    }

    #[tokio::test]
    async fn test_empty_composite_defaults_to_debug() {
        let composite = CompositeLogger::new(vec![]);
        assert_eq!(composite.level(), LogLevel::Debug);
        composite.log_debug("no sinks", "").await;
    }
}
