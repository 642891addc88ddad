//! Call-site diagnostics for deprecated keyword parameters
//!
//! Static counterpart of the runtime notifications: given the decoration
//! records retained on decorated callables and a list of call sites, reports
//! every deprecated keyword a call supplies, with the same message text the
//! runtime would emit.
//!
//! # Example
//!
//! ```rust
//! use depparam_core::{deprecations, DecorationRecord, ParameterRemove};
//! use depparam_lint::{CallSite, DecorationIndex, Linter, Location};
//!
//! let mut index = DecorationIndex::new();
//! index.register(
//!     "test.func_keyword_parameter_remove",
//!     DecorationRecord::new(
//!         "func_keyword_parameter_remove",
//!         deprecations![ParameterRemove::new("removed").unwrap()],
//!     )
//!     .unwrap(),
//! );
//!
//! let site = CallSite::new("test.func_keyword_parameter_remove", Location::new("test.py", 8))
//!     .with_keyword("removed");
//! let report = Linter::new(index).check_all([&site]);
//!
//! assert_eq!(report.exit_code(), 1);
//! assert!(report.to_string().starts_with("test.py:8: error: Argument \"removed\""));
//! ```

#![warn(missing_docs)]

pub mod call_site;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod index;
pub mod linter;

// Re-exports
pub use call_site::{CallSite, Location};
pub use config::LintConfig;
pub use diagnostic::{LintDiagnostic, LintReport, Severity, DEPRECATED_ARG};
pub use error::{LintError, LintResult};
pub use index::DecorationIndex;
pub use linter::Linter;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
