//! Deprecation notification channel
//!
//! Process-wide, non-fatal side channel. A notification is handled in one of
//! two ways:
//!
//! - Inside a [`capture`] scope on the emitting thread it is recorded there
//!   and goes nowhere else. Scopes nest; the innermost one records.
//! - Otherwise it is delivered according to the process-wide
//!   [`ChannelConfig`]: filtered by [`Action`], logged through `tracing` at
//!   `warn` (target `depparam::deprecation`), and passed to every registered
//!   [`NotificationSink`].
//!
//! # Example
//!
//! ```rust
//! use depparam_core::notify;
//!
//! let (value, seen) = notify::capture(|| 42);
//! assert_eq!(value, 42);
//! assert!(seen.is_empty());
//! ```

use crate::config::{Action, ChannelConfig};
use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

/// Notification category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Deprecated argument usage
    Deprecation,
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deprecation => f.write_str("deprecation"),
        }
    }
}

/// One deprecated-argument notification
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Notification {
    category: Category,
    func: String,
    old_name: String,
    message: String,
}

impl Notification {
    /// Create deprecation notification
    #[must_use]
    pub fn deprecation(
        func: impl Into<String>,
        old_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category: Category::Deprecation,
            func: func.into(),
            old_name: old_name.into(),
            message: message.into(),
        }
    }

    /// Category
    #[inline]
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Name of the called function
    #[inline]
    #[must_use]
    pub fn func(&self) -> &str {
        &self.func
    }

    /// Deprecated keyword that was used
    #[inline]
    #[must_use]
    pub fn old_name(&self) -> &str {
        &self.old_name
    }

    /// Formatted message
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Receiver of delivered notifications
pub trait NotificationSink: Send + Sync + Debug {
    /// Handle one notification
    fn deliver(&self, notification: &Notification);
}

/// Sink that keeps every notification in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    /// Create empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of recorded notifications
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.records.lock().clone()
    }

    /// Drain recorded notifications
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.records.lock())
    }

    /// Number of recorded notifications
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Nothing recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl NotificationSink for RecordingSink {
    fn deliver(&self, notification: &Notification) {
        self.records.lock().push(notification.clone());
    }
}

#[derive(Default)]
struct Channel {
    config: RwLock<ChannelConfig>,
    sinks: RwLock<Vec<Arc<dyn NotificationSink>>>,
    delivered: Mutex<HashSet<String>>,
}

impl Channel {
    fn deliver(&self, notification: &Notification) {
        let config = *self.config.read();
        match config.action {
            Action::Ignore => return,
            Action::Once => {
                if !self.delivered.lock().insert(notification.message.clone()) {
                    return;
                }
            }
            Action::Always => {}
        }

        if config.log {
            tracing::warn!(
                target: "depparam::deprecation",
                category = %notification.category,
                func = %notification.func,
                old_name = %notification.old_name,
                "{}",
                notification.message
            );
        }

        // Sinks run without the lock held.
        let sinks = self.sinks.read().clone();
        for sink in &sinks {
            sink.deliver(notification);
        }
    }
}

static CHANNEL: Lazy<Channel> = Lazy::new(Channel::default);

thread_local! {
    static CAPTURE: RefCell<Vec<Vec<Notification>>> = const { RefCell::new(Vec::new()) };
}

/// Replace the process-wide configuration
pub fn configure(config: ChannelConfig) {
    *CHANNEL.config.write() = config;
}

/// Current process-wide configuration
#[must_use]
pub fn config() -> ChannelConfig {
    *CHANNEL.config.read()
}

/// Register a process-wide sink
pub fn add_sink(sink: Arc<dyn NotificationSink>) {
    CHANNEL.sinks.write().push(sink);
}

/// Remove every registered sink
pub fn clear_sinks() {
    CHANNEL.sinks.write().clear();
}

/// Forget which messages [`Action::Once`] has already delivered
pub fn reset_once_registry() {
    CHANNEL.delivered.lock().clear();
}

/// Run `f`, recording notifications emitted on this thread
///
/// Recorded notifications bypass the configured action, logging and sinks.
pub fn capture<F, R>(f: F) -> (R, Vec<Notification>)
where
    F: FnOnce() -> R,
{
    let scope = CaptureScope::open();
    let result = f();
    (result, scope.close())
}

struct CaptureScope;

impl CaptureScope {
    fn open() -> Self {
        CAPTURE.with(|stack| stack.borrow_mut().push(Vec::new()));
        Self
    }

    fn close(self) -> Vec<Notification> {
        CAPTURE.with(|stack| {
            stack
                .borrow_mut()
                .last_mut()
                .map(std::mem::take)
                .unwrap_or_default()
        })
    }
}

impl Drop for CaptureScope {
    fn drop(&mut self) {
        CAPTURE.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

pub(crate) fn emit(notification: Notification) {
    let pending = CAPTURE.with(|stack| match stack.borrow_mut().last_mut() {
        Some(frame) => {
            frame.push(notification);
            None
        }
        None => Some(notification),
    });
    if let Some(notification) = pending {
        CHANNEL.deliver(&notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample(message: &str) -> Notification {
        Notification::deprecation("f", "x", message)
    }

    #[test]
    fn capture_records_in_order() {
        let ((), seen) = capture(|| {
            emit(sample("one"));
            emit(sample("two"));
        });
        let messages: Vec<&str> = seen.iter().map(Notification::message).collect();
        assert_eq!(messages, ["one", "two"]);
        assert_eq!(seen[0].category(), Category::Deprecation);
    }

    #[test]
    fn nested_scope_records_innermost() {
        let (inner, outer) = capture(|| {
            emit(sample("outer"));
            let ((), inner) = capture(|| emit(sample("inner")));
            inner
        });
        assert_eq!(inner.len(), 1);
        assert_eq!(inner[0].message(), "inner");
        assert_eq!(outer.len(), 1);
        assert_eq!(outer[0].message(), "outer");
    }

    #[test]
    fn scope_closes_on_panic() {
        let caught = std::panic::catch_unwind(|| {
            capture(|| panic!("boom"));
        });
        assert!(caught.is_err());
        CAPTURE.with(|stack| assert!(stack.borrow().is_empty()));
    }

    #[test]
    fn capture_is_per_thread() {
        let ((), seen) = capture(|| {
            std::thread::spawn(|| emit(sample("elsewhere")))
                .join()
                .unwrap();
        });
        assert!(seen.is_empty());
    }

    #[test]
    fn recording_sink_collects() {
        let sink = RecordingSink::new();
        sink.deliver(&sample("a"));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.take()[0].to_string(), "a");
        assert!(sink.is_empty());
    }
}
