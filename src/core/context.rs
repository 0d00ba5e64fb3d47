//! Process-wide state
//!
//! One [`Context`] per process holds the default registry, the mask
//! allocator every [`AppenderHandle`](super::AppenderHandle) draws from and
//! the stats accumulator shared by registries that were not given their own.
//! It is built on first access.

use super::mask::MaskRegistry;
use super::registry::Registry;
use super::stats::{LevelStats, StatsSnapshot};
use std::sync::{Arc, OnceLock};

pub struct Context {
    masks: MaskRegistry,
    stats: Arc<LevelStats>,
    registry: OnceLock<Registry>,
}

static CONTEXT: OnceLock<Context> = OnceLock::new();

impl Context {
    fn new() -> Self {
        Self {
            masks: MaskRegistry::new(),
            stats: Arc::new(LevelStats::new()),
            registry: OnceLock::new(),
        }
    }

    pub fn masks(&self) -> &MaskRegistry {
        &self.masks
    }

    pub fn stats(&self) -> &Arc<LevelStats> {
        &self.stats
    }

    /// The default hierarchy, created with the shared stats on first use.
    pub fn registry(&self) -> &Registry {
        self.registry
            .get_or_init(|| Registry::builder().stats(Arc::clone(&self.stats)).build())
    }
}

/// The process context, initialised on first call.
pub fn get() -> &'static Context {
    CONTEXT.get_or_init(Context::new)
}

pub fn masks() -> &'static MaskRegistry {
    get().masks()
}

/// Read and reset the process-wide per-level counters.
pub fn stats() -> StatsSnapshot {
    get().stats().take()
}

/// Zero the process-wide counters without reading them. Meant for tests
/// that need a known starting point.
pub fn reset_stats() {
    get().stats().reset();
}
