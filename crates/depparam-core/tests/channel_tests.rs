//! Notification Channel Tests
//!
//! These tests change process-wide channel state, so they serialize on a
//! shared lock and restore defaults when done.

use depparam_core::notify::{self, RecordingSink};
use depparam_core::prelude::*;
use depparam_core::{Action, ChannelConfig};
use depparam_test_utils::{func_keyword_parameter_remove, func_keyword_parameter_rename, kwargs};
use std::sync::{Arc, Mutex, MutexGuard};

static GLOBAL: Mutex<()> = Mutex::new(());

struct Fixture {
    sink: Arc<RecordingSink>,
    _guard: MutexGuard<'static, ()>,
}

impl Fixture {
    fn new(config: ChannelConfig) -> Self {
        let guard = GLOBAL.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        notify::clear_sinks();
        notify::reset_once_registry();
        notify::configure(config);
        let sink = Arc::new(RecordingSink::new());
        notify::add_sink(sink.clone());
        Self {
            sink,
            _guard: guard,
        }
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        notify::clear_sinks();
        notify::reset_once_registry();
        notify::configure(ChannelConfig::default());
    }
}

#[test]
fn test_always_delivers_every_notification() {
    let fixture = Fixture::new(ChannelConfig::default().with_log(false));
    let f = func_keyword_parameter_remove();

    f.call(kwargs([("removed", 1)])).unwrap();
    f.call(kwargs([("removed", 2)])).unwrap();
    f.call(CallArgs::new()).unwrap();

    let seen = fixture.sink.take();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].func(), "func_keyword_parameter_remove");
}

#[test]
fn test_once_deduplicates_by_message() {
    let fixture = Fixture::new(ChannelConfig::new().with_action(Action::Once));
    let f = func_keyword_parameter_remove();
    let g = func_keyword_parameter_rename();

    for _ in 0..3 {
        f.call(kwargs([("removed", 1)])).unwrap();
        g.call(kwargs([("before", 1)])).unwrap();
    }
    assert_eq!(fixture.sink.len(), 2);

    notify::reset_once_registry();
    f.call(kwargs([("removed", 1)])).unwrap();
    assert_eq!(fixture.sink.len(), 3);
}

#[test]
fn test_ignore_drops_but_call_still_rewrites() {
    let fixture = Fixture::new(ChannelConfig::new().with_action(Action::Ignore));
    let g = func_keyword_parameter_rename();

    assert_eq!(g.call(kwargs([("before", 4)])).unwrap(), 4);
    assert!(fixture.sink.is_empty());
    assert!(g.call(kwargs([("before", 4), ("now", 5)])).unwrap_err().is_conflict());
}

#[test]
fn test_capture_bypasses_sinks_and_action() {
    let fixture = Fixture::new(ChannelConfig::new().with_action(Action::Ignore));
    let f = func_keyword_parameter_remove();

    let (_, seen) = notify::capture(|| f.call(kwargs([("removed", 1)])));
    assert_eq!(seen.len(), 1);
    assert!(fixture.sink.is_empty());
}

#[test]
fn test_config_round_trip() {
    let _fixture = Fixture::new(
        ChannelConfig::from_toml_str("action = \"once\"\nlog = false").unwrap(),
    );
    assert_eq!(
        notify::config(),
        ChannelConfig::new().with_action(Action::Once).with_log(false)
    );
}
