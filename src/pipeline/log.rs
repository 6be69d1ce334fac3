//! Progress log shared between the worker and its observer

use chrono::{DateTime, Local};
use std::fmt;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// One progress message
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            LogLevel::Info => write!(f, "[{}] {}", self.at.format("%H:%M:%S"), self.message),
            level => write!(
                f,
                "[{}] {}: {}",
                self.at.format("%H:%M:%S"),
                level.as_str(),
                self.message
            ),
        }
    }
}

/// Receiving end of a [`LogSink`]
pub type LogReceiver = mpsc::UnboundedReceiver<LogEntry>;

/// Append-only, cloneable progress log.
///
/// Entries are mirrored to `tracing` at debug level. Writes after the
/// receiver is gone are dropped silently.
#[derive(Debug, Clone)]
pub struct LogSink {
    tx: mpsc::UnboundedSender<LogEntry>,
}

impl LogSink {
    pub fn channel() -> (Self, LogReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(level = level.as_str(), "{}", message);
        let _ = self.tx.send(LogEntry {
            at: Local::now(),
            level,
            message,
        });
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }
}

/// Drain everything currently queued without waiting
pub fn drain(rx: &mut LogReceiver) -> Vec<LogEntry> {
    let mut entries = Vec::new();
    while let Ok(entry) = rx.try_recv() {
        entries.push(entry);
    }
    entries
}
