//! Log event structure

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// Message payload of an event.
///
/// `Args` keeps the caller's `format_args!` unrendered; the text is only
/// produced when a layout writes it out.
#[derive(Clone)]
pub enum Message<'a> {
    Text(&'a str),
    Owned(String),
    Args(fmt::Arguments<'a>),
}

impl Message<'_> {
    /// Render the message into an owned or borrowed string.
    ///
    /// A `Display` impl inside `Args` that fails is reported as
    /// [`LoggerError::FormatterError`] instead of panicking.
    pub fn try_text(&self) -> Result<Cow<'_, str>> {
        match self {
            Message::Text(s) => Ok(Cow::Borrowed(s)),
            Message::Owned(s) => Ok(Cow::Borrowed(s.as_str())),
            Message::Args(args) => match args.as_str() {
                Some(s) => Ok(Cow::Borrowed(s)),
                None => {
                    let mut text = String::new();
                    fmt::write(&mut text, *args)
                        .map_err(|e| LoggerError::formatter("message", e.to_string()))?;
                    Ok(Cow::Owned(text))
                }
            },
        }
    }
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Text(s) => f.write_str(s),
            Message::Owned(s) => f.write_str(s),
            Message::Args(args) => f.write_fmt(*args),
        }
    }
}

impl fmt::Debug for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_text() {
            Ok(text) => fmt::Debug::fmt(&text, f),
            Err(_) => f.write_str("<unformattable>"),
        }
    }
}

impl<'a> From<&'a str> for Message<'a> {
    fn from(s: &'a str) -> Self {
        Message::Text(s)
    }
}

impl<'a> From<&'a String> for Message<'a> {
    fn from(s: &'a String) -> Self {
        Message::Text(s.as_str())
    }
}

impl From<String> for Message<'_> {
    fn from(s: String) -> Self {
        Message::Owned(s)
    }
}

impl<'a> From<fmt::Arguments<'a>> for Message<'a> {
    fn from(args: fmt::Arguments<'a>) -> Self {
        Message::Args(args)
    }
}

/// Immutable snapshot of one logging call, shared by every appender it reaches.
#[derive(Debug, Clone)]
pub struct LogEvent<'a> {
    pub level: LogLevel,
    /// Logger name without the trailing separator, or the calling function.
    pub origin: &'a str,
    pub message: Message<'a>,
    pub timestamp: DateTime<Utc>,
    pub thread_id: String,
    pub thread_name: Option<String>,
}

impl<'a> LogEvent<'a> {
    pub fn new(level: LogLevel, origin: &'a str, message: Message<'a>) -> Self {
        Self {
            level,
            origin,
            message,
            timestamp: Utc::now(),
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
        }
    }

    /// Thread name when set, otherwise the thread id.
    pub fn thread(&self) -> &str {
        self.thread_name.as_deref().unwrap_or(&self.thread_id)
    }
}
