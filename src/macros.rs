//! Logging macros for ergonomic log message formatting.
//!
//! The message is passed as `format_args!`, so nothing is rendered unless the
//! logger accepts the level. Each macro also passes the enclosing function's
//! path as the event origin, which loggers with
//! [`LoggerOptions::FUNCTION_ORIGIN`](crate::LoggerOptions::FUNCTION_ORIGIN)
//! report instead of their own name. All macros evaluate to the
//! `Result` of [`Logger::append`](crate::Logger::append).
//!
//! # Examples
//!
//! ```
//! use rust_logger_hierarchy::prelude::*;
//! use rust_logger_hierarchy::info;
//!
//! let registry = Registry::new();
//! let logger = registry.lookup("server");
//!
//! info!(logger, "Server started")?;
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port)?;
//! # Ok::<(), LoggerError>(())
//! ```

/// Path of the enclosing function, e.g. `my_crate::net::connect`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        name[..name.len() - 3].trim_end_matches("::{{closure}}")
    }};
}

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_logger_hierarchy::prelude::*;
/// # let logger = Registry::new().lookup("app");
/// use rust_logger_hierarchy::log;
/// log!(logger, LogLevel::Info, "Simple message")?;
/// log!(logger, LogLevel::Error, "Error code: {}", 500)?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.append($level, format_args!($($arg)+), Some($crate::function_name!()))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a verbose-level message.
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Verbose, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_logger_hierarchy::prelude::*;
/// # let logger = Registry::new().lookup("app");
/// use rust_logger_hierarchy::info;
/// info!(logger, "Application started")?;
/// info!(logger, "Processing {} items", 100)?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// # Examples
///
/// ```
/// # use rust_logger_hierarchy::prelude::*;
/// # let logger = Registry::new().lookup("app");
/// use rust_logger_hierarchy::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full")?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
