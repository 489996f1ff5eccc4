//! Host logging.
//!
//! JSON events on stderr, so `sample` output on stdout stays pipeable. Only startup,
//! plugin registration and module instantiation log, random buffer calls never do.

use clap::ValueEnum;
use tracing::{level_filters::LevelFilter, subscriber::SetGlobalDefaultError};
use tracing_subscriber::{
    fmt::{format::FmtSpan, time},
    FmtSubscriber,
};

/// All valid logging levels.
#[derive(ValueEnum, Clone, Copy)]
pub enum LogLevel {
    /// Errors
    Error,
    /// Warnings
    Warn,
    /// Informational Messages
    Info,
    /// Debug messages
    Debug,
}

/// Implements a conversion from `LogLevel` enum to the `tracing::Level`.
impl From<LogLevel> for tracing::Level {
    fn from(val: LogLevel) -> Self {
        match val {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
        }
    }
}

/// Builds the JSON subscriber: level, thread, source location and an RFC 3339 UTC
/// timestamp on every event, plugin spans reported when they close, events above
/// `log_level` dropped.
fn init_subscriber(log_level: LogLevel) -> Result<(), SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder()
        .json()
        .with_level(true)
        .with_thread_names(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(time::UtcTime::rfc_3339())
        .with_span_events(FmtSpan::CLOSE)
        .with_max_level(LevelFilter::from_level(log_level.into()))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}

/// Install the host subscriber as the process-wide default, once at startup.
///
/// # Errors
/// - A global subscriber is already set.
pub fn init(log_level: LogLevel) -> Result<(), SetGlobalDefaultError> {
    init_subscriber(log_level)
}
