//! Log severity levels

/// Ordered severity: `Debug < Info < Warning < Error < Request`.
///
/// A sink emits a message when the message's level is at or above the
/// sink's configured level, so a sink set to `Debug` emits everything
/// and a sink set to `Request` emits only request traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Request,
}

impl LogLevel {
    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warning,
            3 => LogLevel::Error,
            _ => LogLevel::Request,
        }
    }

    pub(crate) fn as_u8(self) -> u8 {
        match self {
            LogLevel::Debug => 0,
            LogLevel::Info => 1,
            LogLevel::Warning => 2,
            LogLevel::Error => 3,
            LogLevel::Request => 4,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Request => "REQUEST",
        };
        write!(f, "{}", name)
    }
}
