//! Logger handles and event dispatch

use super::{
    appender::{Appender, AppenderHandle},
    error::Result,
    log_event::{LogEvent, Message},
    log_level::LogLevel,
    options::LoggerOptions,
    registry::{NodeId, Registry, ROOT},
};
use std::fmt;
use std::sync::Arc;

/// Handle to one named node of a [`Registry`].
///
/// Handles are cheap to clone. Every handle for the same name refers to the
/// same node, so a level set through one is seen through all of them.
///
/// Logging calls return `Result<&Self>`: a sink that fails to write stops
/// delivery of that event and the error is handed back to the caller.
#[derive(Clone)]
pub struct Logger {
    registry: Registry,
    id: NodeId,
    name: Arc<str>,
}

impl Logger {
    pub(crate) fn new(registry: Registry, id: NodeId, name: &str) -> Self {
        Self {
            registry,
            id,
            name: Arc::from(name),
        }
    }

    /// Dotted name without the trailing separator; empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The nearest existing ancestor, `None` for the root.
    pub fn parent(&self) -> Option<Logger> {
        let hierarchy = self.registry.shared.hierarchy.read();
        let parent = hierarchy.nodes[self.id].parent?;
        let name = &hierarchy.nodes[parent].name;
        let display = name.strip_suffix('.').unwrap_or(name);
        Some(Logger::new(self.registry.clone(), parent, display))
    }

    pub fn level(&self) -> LogLevel {
        self.registry.shared.hierarchy.read().nodes[self.id].level
    }

    /// Set the level of this logger only.
    pub fn set_level(&self, level: LogLevel) -> &Self {
        self.registry.shared.hierarchy.write().nodes[self.id].level = level;
        self
    }

    /// Set the level of this logger and every descendant.
    pub fn propagate_level(&self, level: LogLevel) -> &Self {
        self.registry
            .shared
            .hierarchy
            .write()
            .propagate_level(self.id, level);
        self
    }

    pub fn options(&self) -> LoggerOptions {
        self.registry.shared.hierarchy.read().nodes[self.id].options
    }

    pub fn option(&self, option: LoggerOptions) -> bool {
        self.options().contains(option)
    }

    /// Turn `option` on or off here, and in every descendant when `propagate`.
    pub fn set_option(&self, option: LoggerOptions, enabled: bool, propagate: bool) -> &Self {
        let mut hierarchy = self.registry.shared.hierarchy.write();
        if propagate {
            hierarchy.propagate_option(self.id, option, enabled);
        } else {
            hierarchy.nodes[self.id].options.set(option, enabled);
        }
        self
    }

    /// Attach `appender` in front of this logger's own chain.
    pub fn add<A: Appender + 'static>(&self, appender: &AppenderHandle<A>) -> &Self {
        self.add_dyn(appender.to_dyn())
    }

    pub fn add_dyn(&self, appender: AppenderHandle) -> &Self {
        self.registry.shared.hierarchy.write().nodes[self.id]
            .appenders
            .insert(0, appender);
        self
    }

    /// Detach this logger's own appenders. Ancestors keep theirs.
    pub fn clear(&self) -> &Self {
        self.registry.shared.hierarchy.write().nodes[self.id]
            .appenders
            .clear();
        self
    }

    /// This logger's own appenders, most recently added first.
    pub fn appenders(&self) -> Vec<AppenderHandle> {
        self.registry.shared.hierarchy.read().nodes[self.id]
            .appenders
            .clone()
    }

    /// Whether an event at `level` would be accepted by this logger.
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.level().admits(level)
    }

    /// Log `message` at `level`.
    ///
    /// `origin` names the calling function; it replaces the logger name in
    /// the event when [`LoggerOptions::FUNCTION_ORIGIN`] is set.
    pub fn append<'m>(
        &self,
        level: LogLevel,
        message: impl Into<Message<'m>>,
        origin: Option<&str>,
    ) -> Result<&Self> {
        if !self.enabled(level) {
            return Ok(self);
        }
        self.emit(level, message.into(), origin)?;
        Ok(self)
    }

    /// Log the text produced by `message`, calling it only when `level` is enabled.
    ///
    /// ```
    /// use rust_logger_hierarchy::prelude::*;
    ///
    /// let registry = Registry::new();
    /// let logger = registry.lookup("quiet");
    /// logger.set_level(LogLevel::Error);
    ///
    /// let mut called = false;
    /// logger.append_with(LogLevel::Info, None, || {
    ///     called = true;
    ///     String::from("expensive")
    /// }).unwrap();
    /// assert!(!called);
    /// ```
    pub fn append_with<F, S>(&self, level: LogLevel, origin: Option<&str>, message: F) -> Result<&Self>
    where
        F: FnOnce() -> S,
        S: AsRef<str>,
    {
        if !self.enabled(level) {
            return Ok(self);
        }
        let text = message();
        self.emit(level, Message::Text(text.as_ref()), origin)?;
        Ok(self)
    }

    fn emit(&self, level: LogLevel, message: Message<'_>, origin: Option<&str>) -> Result<bool> {
        let origin = match origin {
            Some(function) if self.option(LoggerOptions::FUNCTION_ORIGIN) => function,
            _ => self.name(),
        };
        let event = LogEvent::new(level, origin, message);
        self.deliver(&event)
    }

    /// Hand `event` to this logger's appenders, then to its ancestors' while
    /// the loggers passed through are additive.
    ///
    /// Each sink identity receives the event at most once, and only if the
    /// event level reaches the appender's own threshold. The first failing
    /// sink aborts delivery. Returns whether any sink received the event; if
    /// so and this logger collects stats, the level counter is bumped.
    pub fn deliver(&self, event: &LogEvent<'_>) -> Result<bool> {
        let (targets, collect_stats) = {
            let hierarchy = self.registry.shared.hierarchy.read();
            let collect = hierarchy.nodes[self.id]
                .options
                .contains(LoggerOptions::COLLECT_STATS);
            (hierarchy.route(self.id, event.level), collect)
        };

        for appender in &targets {
            appender.write(event)?;
        }

        let delivered = !targets.is_empty();
        if delivered && collect_stats {
            self.registry.shared.stats.record(event.level);
        }
        Ok(delivered)
    }

    /// Flush this logger's own appenders.
    pub fn flush(&self) -> Result<()> {
        for appender in self.appenders() {
            appender.flush()?;
        }
        Ok(())
    }

    #[inline]
    pub fn debug<'m>(&self, message: impl Into<Message<'m>>) -> Result<&Self> {
        self.append(LogLevel::Debug, message, None)
    }

    #[inline]
    pub fn trace<'m>(&self, message: impl Into<Message<'m>>) -> Result<&Self> {
        self.append(LogLevel::Trace, message, None)
    }

    #[inline]
    pub fn verbose<'m>(&self, message: impl Into<Message<'m>>) -> Result<&Self> {
        self.append(LogLevel::Verbose, message, None)
    }

    #[inline]
    pub fn info<'m>(&self, message: impl Into<Message<'m>>) -> Result<&Self> {
        self.append(LogLevel::Info, message, None)
    }

    #[inline]
    pub fn warn<'m>(&self, message: impl Into<Message<'m>>) -> Result<&Self> {
        self.append(LogLevel::Warn, message, None)
    }

    #[inline]
    pub fn error<'m>(&self, message: impl Into<Message<'m>>) -> Result<&Self> {
        self.append(LogLevel::Error, message, None)
    }

    #[inline]
    pub fn fatal<'m>(&self, message: impl Into<Message<'m>>) -> Result<&Self> {
        self.append(LogLevel::Fatal, message, None)
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.registry.same_as(&other.registry)
    }
}

impl Eq for Logger {}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("options", &self.options())
            .finish()
    }
}
