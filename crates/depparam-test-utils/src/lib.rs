//! Testing utilities for the depparam workspace
//!
//! Reference fixtures: decorated functions and methods shared by the
//! runtime and lint test suites.

#![allow(missing_docs)]

use depparam_core::{
    decorate, deprecations, BoundMethod, CallArgs, Callable, Deprecated, FnCallable, Notification,
    Signature,
};
use depparam_rule::{ParameterRemove, ParameterRename};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install a test-writer subscriber once per process
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "depparam_core=debug,depparam=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

fn returns_now(name: &str, signature: Signature) -> FnCallable {
    FnCallable::new(name, signature, |bound| {
        Ok(bound.get("now").cloned().unwrap_or(Value::Null))
    })
}

/// `f()` with `removed` deprecated
pub fn func_keyword_parameter_remove() -> Deprecated {
    decorate(
        deprecations![ParameterRemove::new("removed").unwrap()],
        FnCallable::new("func_keyword_parameter_remove", Signature::empty(), |_| {
            Ok(Value::Null)
        }),
    )
    .unwrap()
}

/// `g(*, now)` returning `now`, with `before` renamed to `now`
pub fn func_keyword_parameter_rename() -> Deprecated {
    let signature = Signature::builder().keyword_only("now").build().unwrap();
    decorate(
        deprecations![ParameterRename::new("before", "now").unwrap()],
        returns_now("func_keyword_parameter_rename", signature),
    )
    .unwrap()
}

/// Decorated method `(self)` with `removed` deprecated
pub fn method_keyword_parameter_remove() -> Arc<Deprecated> {
    let signature = Signature::builder().receiver("self").build().unwrap();
    Arc::new(
        decorate(
            deprecations![ParameterRemove::new("removed").unwrap()],
            FnCallable::new("method_keyword_parameter_remove", signature, |_| {
                Ok(Value::Null)
            }),
        )
        .unwrap(),
    )
}

/// Decorated method `(self, *, now)` returning `now`
pub fn method_keyword_parameter_rename() -> Arc<Deprecated> {
    let signature = Signature::builder()
        .receiver("self")
        .keyword_only("now")
        .build()
        .unwrap();
    Arc::new(
        decorate(
            deprecations![ParameterRename::new("before", "now").unwrap()],
            returns_now("method_keyword_parameter_rename", signature),
        )
        .unwrap(),
    )
}

/// Bind a method fixture to a fresh instance of `type_name`
pub fn instance_method(method: Arc<Deprecated>, type_name: &str) -> BoundMethod {
    BoundMethod::bind(method, json!({ "type": type_name }))
}

/// Call arguments from keyword pairs
pub fn kwargs<I, K, V>(pairs: I) -> CallArgs
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .fold(CallArgs::new(), |args, (k, v)| args.kwarg(k, v))
}

/// Assert exactly one deprecation notification for `old_name` on `func`
pub fn assert_single_deprecation(seen: &[Notification], func: &str, old_name: &str) {
    assert_eq!(seen.len(), 1, "expected one notification, got {seen:?}");
    let notification = &seen[0];
    assert_eq!(notification.func(), func);
    assert_eq!(notification.old_name(), old_name);
    let prefix = format!("Argument \"{old_name}\" for \"{func}\" is deprecated");
    assert!(
        notification.message().starts_with(&prefix),
        "unexpected message: {}",
        notification.message()
    );
}

/// Name and record of a decorated callable, for lint indexes
pub fn record_of(callable: &dyn Callable) -> (String, depparam_core::DecorationRecord) {
    let record = callable
        .decoration()
        .cloned()
        .expect("callable is not decorated");
    (callable.name().to_string(), record)
}
