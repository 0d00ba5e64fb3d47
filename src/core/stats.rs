//! Per-level delivery statistics
//!
//! Counts events that reached at least one appender, broken down by level.
//! Reading the counters through [`LevelStats::take`] resets them.

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

const SLOTS: usize = LogLevel::EMITTABLE.len();

/// Atomic per-level counters.
///
/// # Example
///
/// ```
/// use rust_logger_hierarchy::{LevelStats, LogLevel};
///
/// let stats = LevelStats::new();
/// stats.record(LogLevel::Info);
/// stats.record(LogLevel::Warn);
///
/// let snapshot = stats.take();
/// assert_eq!(snapshot.total(), 2);
/// assert_eq!(stats.peek().total(), 0);
/// ```
#[derive(Debug)]
pub struct LevelStats {
    counts: [AtomicU64; SLOTS],
}

impl LevelStats {
    /// Create a new stats instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            counts: [const { AtomicU64::new(0) }; SLOTS],
        }
    }

    /// Count one delivered event. Events at `None` are ignored.
    #[inline]
    pub fn record(&self, level: LogLevel) {
        if let Some(slot) = level.index() {
            self.counts[slot].fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Read the counters without resetting them.
    pub fn peek(&self) -> StatsSnapshot {
        let mut counts = [0; SLOTS];
        for (out, counter) in counts.iter_mut().zip(&self.counts) {
            *out = counter.load(Ordering::Relaxed);
        }
        StatsSnapshot { counts }
    }

    /// Read and zero the counters.
    ///
    /// Each counter is swapped out atomically, so an increment racing with
    /// this call lands either in the returned snapshot or in the next one.
    pub fn take(&self) -> StatsSnapshot {
        let mut counts = [0; SLOTS];
        for (out, counter) in counts.iter_mut().zip(&self.counts) {
            *out = counter.swap(0, Ordering::Relaxed);
        }
        StatsSnapshot { counts }
    }

    /// Zero all counters
    pub fn reset(&self) {
        for counter in &self.counts {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

impl Default for LevelStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Counter values at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    counts: [u64; SLOTS],
}

impl StatsSnapshot {
    /// Count for `level`; always zero for [`LogLevel::None`].
    pub fn count(&self, level: LogLevel) -> u64 {
        level.index().map_or(0, |slot| self.counts[slot])
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(level, count)` pairs, lowest level first.
    pub fn iter(&self) -> impl Iterator<Item = (LogLevel, u64)> + '_ {
        LogLevel::EMITTABLE.iter().copied().zip(self.counts.iter().copied())
    }
}
