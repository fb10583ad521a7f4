//! Logging capability used by the facade and the pool.
//!
//! [`Db`](crate::Db) never calls `tracing` directly; it goes through a [`Logger`] so
//! applications can route messages into their own sink. [`TracingLogger`] is the
//! default and emits ordinary `tracing` events under the `mysqlkit` target.

use std::fmt;
use std::sync::Arc;

/// Sink for the messages emitted by the facade and the pool.
///
/// `info` is used for connection lifecycle, `debug` for every executed statement and
/// `error` for pool and driver failures.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn debug(&self, message: &str);
    fn error(&self, message: &str);

    /// Non-fatal anomalies, such as an UPDATE without conditions.
    ///
    /// Loggers that only support the three basic levels get these as `info`.
    fn warn(&self, message: &str) {
        self.info(message);
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn debug(&self, message: &str) {
        (**self).debug(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }

    fn warn(&self, message: &str) {
        (**self).warn(message);
    }
}

/// [`Logger`] backed by `tracing`.
///
/// Messages longer than `max_message_length` characters are truncated.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    /// Truncate long messages (in chars). `None` means no truncation.
    pub max_message_length: Option<usize>,
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self {
            max_message_length: Some(1024),
        }
    }
}

impl TracingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum message length to display.
    pub fn max_message_length(mut self, len: usize) -> Self {
        self.max_message_length = Some(len);
        self
    }

    /// Disable truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_message_length = None;
        self
    }

    fn clip<'a>(&self, message: &'a str) -> Clipped<'a> {
        match self.max_message_length {
            Some(max) => Clipped { message, max },
            None => Clipped {
                message,
                max: usize::MAX,
            },
        }
    }
}

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "mysqlkit", "{}", self.clip(message));
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: "mysqlkit", "{}", self.clip(message));
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "mysqlkit", "{}", self.clip(message));
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "mysqlkit", "{}", self.clip(message));
    }
}

/// Lazily truncated message, so disabled levels never allocate.
struct Clipped<'a> {
    message: &'a str,
    max: usize,
}

impl fmt::Display for Clipped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message.char_indices().nth(self.max) {
            Some((cut, _)) => write!(f, "{}...", &self.message[..cut]),
            None => f.write_str(self.message),
        }
    }
}

/// [`Logger`] that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn info(&self, _message: &str) {}
    fn debug(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
