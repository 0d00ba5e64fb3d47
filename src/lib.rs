//! # Rust Logger Hierarchy
//!
//! A hierarchical, leveled logging registry. Loggers are named with dotted
//! paths (`"net.http.client"`) and form a tree: a logger inherits its level
//! and options from its nearest ancestor when created, and events travel
//! from the logger they were raised on up through its additive ancestors.
//!
//! ## Features
//!
//! - **Any creation order**: `"a.b.c"` may be created before `"a.b"`; the
//!   hierarchy re-parents and re-configures existing loggers as gaps fill in
//! - **Shared appenders**: one sink attached at several levels of the tree
//!   still receives each event once
//! - **Cheap disabled calls**: messages are `format_args!` or closures and are
//!   only rendered once the level check passes
//! - **Per-level statistics**: read-and-reset counters of delivered events
//!
//! ## Example
//!
//! ```
//! use rust_logger_hierarchy::prelude::*;
//!
//! let registry = Registry::new();
//! let ring = AppenderHandle::new(RingBufferAppender::new(1024));
//! registry.root().add(&ring);
//!
//! let http = registry.lookup("net.http");
//! registry.lookup("net").propagate_level(LogLevel::Info);
//!
//! http.verbose("dropped, below Info")?;
//! http.warn("slow upstream")?;
//! assert_eq!(ring.lock().contents(), b"slow upstream");
//! # Ok::<(), LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub use crate::core::{
    Appender, AppenderHandle, Layout, LevelStats, LogEvent, LogLevel, Logger, LoggerError,
    LoggerOptions, Mask, MaskRegistry, Message, Registry, RegistryBuilder, Result,
    StatsSnapshot, TimestampFormat,
};

/// The logger named `name` in the process-wide hierarchy.
///
/// # Panics
///
/// Panics if `name` is empty.
pub fn lookup(name: &str) -> Logger {
    Registry::global().lookup(name)
}

/// The root logger of the process-wide hierarchy.
pub fn root() -> Logger {
    Registry::global().root()
}

/// Read and reset the process-wide per-level delivery counters.
pub fn stats() -> StatsSnapshot {
    crate::core::context::stats()
}

pub mod prelude {
    pub use crate::appenders::RingBufferAppender;
    pub use crate::core::{
        Appender, AppenderHandle, JsonLayout, Layout, LevelStats, LogEvent, LogLevel,
        LogfmtLayout, Logger, LoggerError, LoggerOptions, Message, Registry, RegistryBuilder,
        Result, StatsSnapshot, TextLayout, TimestampFormat,
    };
}
