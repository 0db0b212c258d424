//! Tessera Logging - Fire-and-forget multi-sink logger
//!
//! Provides the logging collaborator consumed by the data layer:
//! - `LogLevel`, ordered severity (Debug < Info < Warning < Error < Request)
//! - `Logger`, the async sink interface with correlation tagging
//! - File, console and composite sinks
//! - `init`, the process-wide tracing subscriber setup
//!
//! Failures inside a sink are swallowed: observability must never corrupt
//! the outcome of the operation being logged.

pub mod composite;
pub mod console;
pub mod factory;
pub mod file;
pub mod init;
pub mod level;
pub mod logger;

pub use composite::CompositeLogger;
pub use console::ConsoleLogger;
pub use factory::{composite_logger, default_composite_logger};
pub use file::FileLogger;
pub use level::LogLevel;
pub use logger::{new_correlation_id, Logger};
