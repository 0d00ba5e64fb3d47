//! Core logger types and traits

pub mod appender;
pub mod context;
pub mod error;
pub mod layout;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod mask;
pub mod options;
pub mod registry;
pub mod stats;
pub mod timestamp;

pub use appender::{Appender, AppenderHandle};
pub use context::Context;
pub use error::{LoggerError, Result};
pub use layout::{JsonLayout, Layout, LogfmtLayout, TextLayout};
pub use log_event::{LogEvent, Message};
pub use log_level::LogLevel;
pub use logger::Logger;
pub use mask::{Mask, MaskRegistry, MASK_BITS};
pub use options::LoggerOptions;
pub use registry::{Registry, RegistryBuilder};
pub use stats::{LevelStats, StatsSnapshot};
pub use timestamp::TimestampFormat;
