//! Decoration engine
//!
//! [`deprecated_parameters`] captures an ordered rule set and returns a
//! [`Decorator`]. Applying the decorator validates the rules against the
//! target's signature once and produces the [`Deprecated`] wrapper.
//!
//! # Example
//!
//! ```rust
//! use depparam_core::{deprecated_parameters, CallArgs, Callable, FnCallable, Signature};
//! use depparam_rule::ParameterRename;
//!
//! let sig = Signature::builder().keyword_only("now").build().unwrap();
//! let target = FnCallable::new("g", sig, |bound| Ok(bound.get("now").cloned().unwrap_or_default()));
//!
//! let g = deprecated_parameters(vec![ParameterRename::new("before", "now").unwrap().into()])
//!     .unwrap()
//!     .wrap(target)
//!     .unwrap();
//!
//! assert_eq!(g.call(CallArgs::new().kwarg("before", 7)).unwrap(), 7);
//! ```

use crate::args::CallArgs;
use crate::callable::Callable;
use crate::error::{DecorationError, DecorationResult};
use crate::intercept::Deprecated;
use depparam_rule::{rules_from_specs, Deprecation, RuleSpec};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Rules bound to one callable
///
/// Created once at decoration and never mutated afterwards. Serializes to
/// the manifest form read by static analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct DecorationRecord {
    func: String,
    rules: Vec<Deprecation>,
}

/// Unchecked manifest form of [`DecorationRecord`]
#[derive(Deserialize)]
struct RawRecord {
    func: String,
    rules: Vec<Deprecation>,
}

impl TryFrom<RawRecord> for DecorationRecord {
    type Error = DecorationError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        Self::new(raw.func, raw.rules)
    }
}

impl DecorationRecord {
    /// Create record
    ///
    /// # Errors
    /// [`DecorationError::Empty`] when `rules` is empty.
    pub fn new(func: impl Into<String>, rules: Vec<Deprecation>) -> DecorationResult<Self> {
        if rules.is_empty() {
            return Err(DecorationError::Empty);
        }
        Ok(Self {
            func: func.into(),
            rules,
        })
    }

    /// Name of the decorated callable
    #[inline]
    #[must_use]
    pub fn func(&self) -> &str {
        &self.func
    }

    /// Rules in declaration order
    #[inline]
    #[must_use]
    pub fn rules(&self) -> &[Deprecation] {
        &self.rules
    }

    /// Rule for a deprecated keyword
    #[must_use]
    pub fn rule_for(&self, old_name: &str) -> Option<&Deprecation> {
        self.rules.iter().find(|r| r.old_name() == old_name)
    }

    /// Check whether any rule matches a supplied keyword
    #[inline]
    #[must_use]
    pub fn matches_any(&self, args: &CallArgs) -> bool {
        self.rules.iter().any(|r| args.contains_keyword(r.old_name()))
    }
}

/// Captured rule set, ready to be applied to callables
#[derive(Debug, Clone)]
pub struct Decorator {
    rules: Arc<[Deprecation]>,
}

impl Decorator {
    /// Build from declarative rule specs
    ///
    /// # Errors
    /// Rule validation failures or an empty list.
    pub fn from_specs(specs: impl IntoIterator<Item = RuleSpec>) -> DecorationResult<Self> {
        deprecated_parameters(rules_from_specs(specs)?)
    }

    /// Captured rules
    #[inline]
    #[must_use]
    pub fn rules(&self) -> &[Deprecation] {
        &self.rules
    }

    /// Decorate `target`
    ///
    /// # Errors
    /// - [`DecorationError::AlreadyDecorated`] if `target` is already a
    ///   decorated wrapper
    /// - [`DecorationError::ParameterNotFound`] if a rename target is not a
    ///   keyword-addressable parameter of `target`
    pub fn apply(&self, target: Arc<dyn Callable>) -> DecorationResult<Deprecated> {
        if target.decoration().is_some() {
            return Err(DecorationError::AlreadyDecorated {
                func: target.name().to_string(),
            });
        }

        let signature = target.signature();
        for new_name in self.rules.iter().filter_map(Deprecation::new_name) {
            let addressable = signature
                .get(new_name)
                .is_some_and(|p| p.kind().accepts_keyword());
            if !addressable {
                return Err(DecorationError::ParameterNotFound {
                    func: target.name().to_string(),
                    signature: signature.to_string(),
                    new_name: new_name.to_string(),
                });
            }
        }

        let record = DecorationRecord::new(target.name(), self.rules.to_vec())?;
        tracing::debug!(
            func = record.func(),
            rules = record.rules().len(),
            "Decorated callable with deprecated parameters"
        );
        Ok(Deprecated::new(target, record))
    }

    /// Decorate an owned callable
    ///
    /// # Errors
    /// See [`Decorator::apply`].
    pub fn wrap<C: Callable + 'static>(&self, target: C) -> DecorationResult<Deprecated> {
        self.apply(Arc::new(target))
    }
}

/// Capture a rule set
///
/// # Errors
/// [`DecorationError::Empty`] when no rules are supplied.
pub fn deprecated_parameters(
    rules: impl IntoIterator<Item = Deprecation>,
) -> DecorationResult<Decorator> {
    let rules: Arc<[Deprecation]> = rules.into_iter().collect();
    if rules.is_empty() {
        return Err(DecorationError::Empty);
    }
    Ok(Decorator { rules })
}

/// Capture `rules` and decorate `target` in one step
///
/// # Errors
/// See [`deprecated_parameters`] and [`Decorator::apply`].
pub fn decorate<C: Callable + 'static>(
    rules: impl IntoIterator<Item = Deprecation>,
    target: C,
) -> DecorationResult<Deprecated> {
    deprecated_parameters(rules)?.wrap(target)
}

/// Build a `Vec<Deprecation>` from rule values of either variant
///
/// ```rust
/// use depparam_core::deprecations;
/// use depparam_rule::{ParameterRemove, ParameterRename};
///
/// let rules = deprecations![
///     ParameterRemove::new("verbose").unwrap(),
///     ParameterRename::new("before", "now").unwrap(),
/// ];
/// assert_eq!(rules.len(), 2);
/// ```
#[macro_export]
macro_rules! deprecations {
    ($($rule:expr),+ $(,)?) => {
        ::std::vec![$($crate::Deprecation::from($rule)),+]
    };
}
