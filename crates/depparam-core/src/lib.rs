//! Keyword-parameter deprecation for dynamically invoked callables
//!
//! Marks individual keyword parameters of a callable as removed or renamed
//! while keeping old call sites working.
//!
//! # Overview
//!
//! - **Signature**: parameter metadata of a callable, computed once
//! - **Callable**: anything invoked with [`CallArgs`] (`FnCallable`, `BoundMethod`)
//! - **Decorator**: validates a rule set against a target once, at decoration
//! - **Deprecated**: the wrapper; on every call it notifies, rewrites keywords
//!   and forwards to the wrapped callable
//! - **notify**: process-wide deprecation notification channel
//!
//! # Example
//!
//! ```rust
//! use depparam_core::prelude::*;
//! use serde_json::json;
//!
//! let sig = Signature::builder().keyword_only("now").build().unwrap();
//! let g = FnCallable::new("g", sig, |bound| Ok(bound.get("now").cloned().unwrap_or_default()));
//!
//! let g = deprecated_parameters(deprecations![ParameterRename::new("before", "now").unwrap()])
//!     .unwrap()
//!     .wrap(g)
//!     .unwrap();
//!
//! let (result, seen) = notify::capture(|| g.call(CallArgs::new().kwarg("before", 7)));
//! assert_eq!(result.unwrap(), json!(7));
//! assert_eq!(seen.len(), 1);
//! ```

#![warn(missing_docs)]

pub mod args;
pub mod callable;
pub mod config;
pub mod decorate;
pub mod error;
pub mod intercept;
pub mod notify;
pub mod signature;

// Re-exports
pub use args::CallArgs;
pub use callable::{BoundMethod, Callable, FnCallable};
pub use config::{Action, ChannelConfig};
pub use decorate::{decorate, deprecated_parameters, DecorationRecord, Decorator};
pub use error::{
    BoxError, CallError, CallResult, ConfigError, DecorationError, DecorationResult,
    SignatureError,
};
pub use intercept::Deprecated;
pub use notify::{Category, Notification, NotificationSink, RecordingSink};
pub use signature::{BoundArguments, ParamKind, Parameter, Signature, SignatureBuilder};

pub use depparam_rule::{
    Deprecation, MessageTemplate, ParameterRemove, ParameterRename, RuleError, RuleKind,
    RuleSpec, Transform, DEFAULT_REMOVE_MESSAGE, DEFAULT_RENAME_MESSAGE, DEFAULT_WHEN,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for decorating callables
    pub use crate::notify;
    pub use crate::{
        deprecated_parameters, deprecations, CallArgs, CallError, Callable, DecorationError,
        Deprecated, Deprecation, FnCallable, ParameterRemove, ParameterRename, Signature,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
