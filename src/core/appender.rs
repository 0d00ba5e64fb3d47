//! Appender trait for log output destinations
//!
//! A sink implements [`Appender`]. Loggers never hold sinks directly: they
//! hold [`AppenderHandle`]s, which pair the sink with its identity [`Mask`],
//! its own threshold level and an optional [`Layout`]. Cloning a handle shares
//! the same sink, so one sink can be attached to several loggers.

use super::context;
use super::error::Result;
use super::layout::Layout;
use super::log_event::LogEvent;
use super::log_level::LogLevel;
use super::mask::Mask;
use parking_lot::{Mutex, MutexGuard, RwLock};
use std::fmt;
use std::sync::Arc;

pub trait Appender: Send {
    /// Render `event` (with `layout`, or the sink's built-in rendering when
    /// `None`) and write it out.
    fn append(&mut self, event: &LogEvent<'_>, layout: Option<&dyn Layout>) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Identity used to allocate the sink's mask bit. Sinks sharing a name
    /// share a bit and receive an event at most once between them.
    fn name(&self) -> &str;
}

struct Slot<A: ?Sized> {
    mask: Mask,
    threshold: RwLock<LogLevel>,
    layout: RwLock<Option<Arc<dyn Layout>>>,
    sink: Mutex<A>,
}

/// Shared, thread-safe reference to an attached sink.
///
/// # Example
///
/// ```
/// use rust_logger_hierarchy::prelude::*;
///
/// let ring = AppenderHandle::new(RingBufferAppender::new(64));
/// ring.set_level(LogLevel::Warn);
///
/// let registry = Registry::new();
/// registry.lookup("app").add(&ring);
/// registry.lookup("app").warn("disk almost full").unwrap();
///
/// assert_eq!(ring.lock().contents(), b"disk almost full");
/// ```
pub struct AppenderHandle<A: ?Sized = dyn Appender> {
    slot: Arc<Slot<A>>,
}

impl<A: Appender + 'static> AppenderHandle<A> {
    /// Wrap `sink`, registering its name with the process-wide mask registry.
    ///
    /// # Panics
    ///
    /// Panics if the process has run out of mask bits, see
    /// [`MaskRegistry::register`](super::mask::MaskRegistry::register).
    pub fn new(sink: A) -> Self {
        let mask = context::masks().register(sink.name());
        Self::with_mask(sink, mask)
    }

    /// Like [`new`](Self::new) but reports mask exhaustion as an error.
    ///
    /// Every handle draws from the same process-wide allocator, so two sinks
    /// with different names never share a bit.
    pub fn try_new(sink: A) -> Result<Self> {
        let mask = context::masks().try_register(sink.name())?;
        Ok(Self::with_mask(sink, mask))
    }

    fn with_mask(sink: A, mask: Mask) -> Self {
        Self {
            slot: Arc::new(Slot {
                mask,
                threshold: RwLock::new(LogLevel::Debug),
                layout: RwLock::new(None),
                sink: Mutex::new(sink),
            }),
        }
    }

    /// Set the layout, builder style.
    #[must_use]
    pub fn with_layout(self, layout: impl Layout + 'static) -> Self {
        self.set_layout(layout);
        self
    }

    /// Set the threshold, builder style.
    #[must_use]
    pub fn with_level(self, level: LogLevel) -> Self {
        self.set_level(level);
        self
    }

    /// Type-erase into the form stored in logger chains.
    pub fn to_dyn(&self) -> AppenderHandle {
        AppenderHandle {
            slot: self.slot.clone(),
        }
    }
}

impl<A: ?Sized> AppenderHandle<A> {
    pub fn mask(&self) -> Mask {
        self.slot.mask
    }

    /// Minimum level an event needs to reach this sink.
    pub fn level(&self) -> LogLevel {
        *self.slot.threshold.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.slot.threshold.write() = level;
    }

    pub fn layout(&self) -> Option<Arc<dyn Layout>> {
        self.slot.layout.read().clone()
    }

    pub fn set_layout(&self, layout: impl Layout + 'static) {
        *self.slot.layout.write() = Some(Arc::new(layout));
    }

    pub fn set_shared_layout(&self, layout: Arc<dyn Layout>) {
        *self.slot.layout.write() = Some(layout);
    }

    /// Go back to the sink's built-in rendering.
    pub fn clear_layout(&self) {
        *self.slot.layout.write() = None;
    }

    /// Exclusive access to the sink itself.
    pub fn lock(&self) -> MutexGuard<'_, A> {
        self.slot.sink.lock()
    }

    /// Whether both handles point at the same sink.
    pub fn same_as<B: ?Sized>(&self, other: &AppenderHandle<B>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.slot), Arc::as_ptr(&other.slot))
    }
}

impl AppenderHandle {
    /// Render and write one event through this sink.
    pub(crate) fn write(&self, event: &LogEvent<'_>) -> Result<()> {
        let layout = self.layout();
        self.slot.sink.lock().append(event, layout.as_deref())
    }

    pub(crate) fn flush(&self) -> Result<()> {
        self.slot.sink.lock().flush()
    }
}

impl<A: ?Sized> Clone for AppenderHandle<A> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<A: ?Sized> fmt::Debug for AppenderHandle<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppenderHandle")
            .field("mask", &self.slot.mask)
            .field("level", &self.level())
            .field("layout", &self.slot.layout.read().is_some())
            .finish()
    }
}
