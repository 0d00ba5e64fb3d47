//! Layouts render an event into bytes for a sink
//!
//! Provides three built-in layouts:
//! - [`TextLayout`]: human-readable single line
//! - [`JsonLayout`]: one JSON object per event
//! - [`LogfmtLayout`]: key=value pairs for log aggregation tools
//!
//! An appender without a layout falls back to [`render_minimal`], which emits
//! the message text and nothing else.

use super::error::Result;
use super::log_event::LogEvent;
use super::timestamp::TimestampFormat;
use std::fmt::Debug;
use std::io::Write;

/// Renders an event into the supplied byte buffer.
pub trait Layout: Debug + Send + Sync {
    fn format(&self, event: &LogEvent<'_>, out: &mut Vec<u8>) -> Result<()>;
}

/// Render with `layout`, or write the bare message when there is none.
pub fn render(event: &LogEvent<'_>, layout: Option<&dyn Layout>, out: &mut Vec<u8>) -> Result<()> {
    match layout {
        Some(layout) => layout.format(event, out),
        None => render_minimal(event, out),
    }
}

/// Built-in rendering used by sinks that were given no layout.
///
/// A `Display` impl failing inside the message surfaces as
/// [`LoggerError::FormatterError`](super::LoggerError::FormatterError).
pub fn render_minimal(event: &LogEvent<'_>, out: &mut Vec<u8>) -> Result<()> {
    out.extend_from_slice(event.message.try_text()?.as_bytes());
    Ok(())
}

/// Escape control characters so one event always stays on one line.
fn sanitize_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Human-readable text layout
///
/// Example: `[2025-01-08T10:30:45.123Z] [INFO ] net.http - Request processed`
#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    timestamp_format: TimestampFormat,
    include_thread: bool,
    #[cfg(feature = "color")]
    use_colors: bool,
}

impl TextLayout {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Add the thread name (or id) after the level.
    #[must_use]
    pub fn with_thread(mut self, include: bool) -> Self {
        self.include_thread = include;
        self
    }

    #[cfg(feature = "color")]
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn level_str(&self, event: &LogEvent<'_>) -> String {
        let level = format!("{:5}", event.level);
        #[cfg(feature = "color")]
        if self.use_colors {
            use colored::Colorize;
            return level.color(event.level.color_code()).to_string();
        }
        level
    }
}

impl Layout for TextLayout {
    fn format(&self, event: &LogEvent<'_>, out: &mut Vec<u8>) -> Result<()> {
        if !self.timestamp_format.is_omitted() {
            write!(out, "[{}] ", self.timestamp_format.format(&event.timestamp))?;
        }
        write!(out, "[{}] ", self.level_str(event))?;
        if self.include_thread {
            write!(out, "[{}] ", event.thread())?;
        }
        write!(
            out,
            "{} - {}",
            event.origin,
            sanitize_message(&event.message.try_text()?)
        )?;
        Ok(())
    }
}

/// JSON layout, one object per event
///
/// Example: `{"timestamp":"2025-01-08T10:30:45.123Z","level":"INFO","origin":"net","message":"up"}`
#[derive(Debug, Clone, Default)]
pub struct JsonLayout {
    timestamp_format: TimestampFormat,
}

impl JsonLayout {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn timestamp_value(&self, event: &LogEvent<'_>) -> serde_json::Value {
        if self.timestamp_format.is_numeric() {
            serde_json::Value::Number(event.timestamp.timestamp_millis().into())
        } else {
            serde_json::Value::String(self.timestamp_format.format(&event.timestamp))
        }
    }
}

impl Layout for JsonLayout {
    fn format(&self, event: &LogEvent<'_>, out: &mut Vec<u8>) -> Result<()> {
        let mut json_obj = serde_json::Map::new();

        if !self.timestamp_format.is_omitted() {
            json_obj.insert("timestamp".to_string(), self.timestamp_value(event));
        }
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(event.level.to_str().to_string()),
        );
        json_obj.insert(
            "origin".to_string(),
            serde_json::Value::String(event.origin.to_string()),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(event.message.try_text()?.into_owned()),
        );
        json_obj.insert(
            "thread_id".to_string(),
            serde_json::Value::String(event.thread_id.clone()),
        );
        if let Some(ref name) = event.thread_name {
            json_obj.insert(
                "thread_name".to_string(),
                serde_json::Value::String(name.clone()),
            );
        }

        serde_json::to_writer(out, &serde_json::Value::Object(json_obj))?;
        Ok(())
    }
}

/// Logfmt layout (key=value pairs)
///
/// Example: `timestamp=2025-01-08T10:30:45.123Z level=INFO origin=net message="up"`
#[derive(Debug, Clone, Default)]
pub struct LogfmtLayout {
    timestamp_format: TimestampFormat,
}

impl LogfmtLayout {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Escape a logfmt value (quote if contains spaces)
    fn escape_value(value: &str) -> String {
        if value.is_empty() || value.contains(' ') || value.contains('"') || value.contains('=') {
            Self::quote_value(value)
        } else {
            value.to_string()
        }
    }

    fn quote_value(value: &str) -> String {
        format!(
            "\"{}\"",
            sanitize_message(&value.replace('\\', "\\\\").replace('"', "\\\""))
        )
    }
}

impl Layout for LogfmtLayout {
    fn format(&self, event: &LogEvent<'_>, out: &mut Vec<u8>) -> Result<()> {
        let mut parts = Vec::with_capacity(5);

        if !self.timestamp_format.is_omitted() {
            parts.push(format!(
                "timestamp={}",
                Self::escape_value(&self.timestamp_format.format(&event.timestamp))
            ));
        }
        parts.push(format!("level={}", event.level.to_str()));
        parts.push(format!("origin={}", Self::escape_value(event.origin)));
        // always quoted
        parts.push(format!("message={}", Self::quote_value(&event.message.try_text()?)));
        parts.push(format!("thread={}", Self::escape_value(event.thread())));

        out.extend_from_slice(parts.join(" ").as_bytes());
        Ok(())
    }
}
