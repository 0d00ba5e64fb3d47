//! Appender implementations

pub mod ring_buffer;

pub use ring_buffer::RingBufferAppender;

// Re-export the trait next to its implementations
pub use crate::core::{Appender, AppenderHandle};
