//! Logger construction helpers

use crate::composite::CompositeLogger;
use crate::console::ConsoleLogger;
use crate::file::FileLogger;
use crate::level::LogLevel;
use std::sync::Arc;

/// Build the default composite logger: file + console, both at Debug.
pub fn default_composite_logger() -> std::io::Result<CompositeLogger> {
    composite_logger(LogLevel::Debug)
}

/// Build a composite logger with file + console sinks at the given level.
pub fn composite_logger(level: LogLevel) -> std::io::Result<CompositeLogger> {
    let file = FileLogger::with_default_path(level)?;
    let console = ConsoleLogger::new(level);

    Ok(CompositeLogger::new(vec![
        Arc::new(file),
        Arc::new(console),
    ]))
}
