//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of an event, ordered from most verbose to most severe.
///
/// `None` sits above every real severity: a logger at `None` accepts nothing,
/// and no event can be emitted at `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Trace = 1,
    Verbose = 2,
    Info = 3,
    Warn = 4,
    Error = 5,
    Fatal = 6,
    None = 7,
}

impl LogLevel {
    /// Every level an event can carry, lowest first.
    pub const EMITTABLE: [LogLevel; 7] = [
        LogLevel::Debug,
        LogLevel::Trace,
        LogLevel::Verbose,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
            LogLevel::Verbose => "VERBOSE",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
            LogLevel::None => "NONE",
        }
    }

    /// Parse a level name, falling back to `default` for anything unknown.
    ///
    /// ```
    /// use rust_logger_hierarchy::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse_or("warning", LogLevel::Info), LogLevel::Warn);
    /// assert_eq!(LogLevel::parse_or("loud", LogLevel::Info), LogLevel::Info);
    /// ```
    pub fn parse_or(s: &str, default: LogLevel) -> LogLevel {
        s.parse().unwrap_or(default)
    }

    /// Whether an event at `event` passes a threshold of `self`.
    #[inline]
    pub fn admits(self, event: LogLevel) -> bool {
        event != LogLevel::None && event >= self
    }

    /// Slot of this level in per-level tables, `None` has no slot.
    #[inline]
    pub(crate) fn index(self) -> Option<usize> {
        match self {
            LogLevel::None => None,
            level => Some(level as usize),
        }
    }

    #[cfg(feature = "color")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => BrightBlack,
            LogLevel::Trace => White,
            LogLevel::Verbose => Cyan,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal | LogLevel::None => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "TRACE" => Ok(LogLevel::Trace),
            "VERBOSE" => Ok(LogLevel::Verbose),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            "NONE" | "OFF" => Ok(LogLevel::None),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
