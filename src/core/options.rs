//! Per-logger option flags

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Set of behaviour flags carried by every logger node.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoggerOptions(u8);

impl LoggerOptions {
    /// Events also travel to the ancestors' appenders.
    pub const ADDITIVE: LoggerOptions = LoggerOptions(1 << 0);
    /// Delivered events originating here are counted in the stats.
    pub const COLLECT_STATS: LoggerOptions = LoggerOptions(1 << 1);
    /// Events report the calling function instead of the logger name.
    pub const FUNCTION_ORIGIN: LoggerOptions = LoggerOptions(1 << 2);

    pub const fn empty() -> Self {
        LoggerOptions(0)
    }

    pub const fn all() -> Self {
        LoggerOptions(0b111)
    }

    #[inline]
    pub const fn contains(self, other: LoggerOptions) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: LoggerOptions) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: LoggerOptions) {
        self.0 &= !other.0;
    }

    #[inline]
    pub fn set(&mut self, other: LoggerOptions, enabled: bool) {
        if enabled {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for LoggerOptions {
    fn default() -> Self {
        LoggerOptions::ADDITIVE | LoggerOptions::COLLECT_STATS
    }
}

impl BitOr for LoggerOptions {
    type Output = LoggerOptions;

    fn bitor(self, rhs: LoggerOptions) -> LoggerOptions {
        LoggerOptions(self.0 | rhs.0)
    }
}

impl BitOrAssign for LoggerOptions {
    fn bitor_assign(&mut self, rhs: LoggerOptions) {
        self.insert(rhs);
    }
}

impl fmt::Debug for LoggerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        if self.contains(LoggerOptions::ADDITIVE) {
            set.entry(&"ADDITIVE");
        }
        if self.contains(LoggerOptions::COLLECT_STATS) {
            set.entry(&"COLLECT_STATS");
        }
        if self.contains(LoggerOptions::FUNCTION_ORIGIN) {
            set.entry(&"FUNCTION_ORIGIN");
        }
        set.finish()
    }
}
