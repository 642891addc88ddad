//! Keyword-parameter deprecation rules
//!
//! Immutable, validated descriptions of one parameter's deprecation.
//!
//! # Overview
//!
//! - **ParameterRemove**: the keyword is gone; by default it is dropped from calls
//! - **ParameterRename**: the keyword has a new name; by default its value is
//!   reassigned to the new name
//! - **Deprecation**: the sum type stored by the decoration engine
//! - **MessageTemplate**: `%(func)s`-style message with a fixed placeholder set
//!
//! # Example
//!
//! ```rust
//! use depparam_rule::{Deprecation, ParameterRename};
//!
//! let rule: Deprecation = ParameterRename::builder()
//!     .old_name("before")
//!     .new_name("now")
//!     .build()
//!     .unwrap()
//!     .into();
//!
//! assert_eq!(rule.old_name(), "before");
//! assert!(rule.render_message("func").contains("renamed to \"now\""));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod factory;
pub mod rule;
pub mod spec;
pub mod template;

// Re-exports
pub use error::{RuleError, RuleResult};
pub use factory::{ParameterRemoveBuilder, ParameterRenameBuilder};
pub use rule::{
    Deprecation, ParameterRemove, ParameterRename, RuleKind, Transform, DEFAULT_REMOVE_MESSAGE,
    DEFAULT_RENAME_MESSAGE, DEFAULT_WHEN,
};
pub use spec::{rules_from_specs, RuleSpec};
pub use template::{MessageContext, MessageTemplate, Placeholder, TemplateError};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for declaring deprecations
    pub use crate::{Deprecation, ParameterRemove, ParameterRename, RuleError, Transform};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
