//! Error types for decoration and invocation
//!
//! Provides error handling for:
//! - Decoration-time configuration errors (empty rule set, double decoration,
//!   rename target missing from the signature)
//! - Call-time errors (argument binding failures, old/new keyword conflicts)
//! - Errors raised by wrapped callables, which pass through untouched

use depparam_rule::RuleError;

/// Boxed error raised by a wrapped callable
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while applying the decorator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecorationError {
    /// No rules supplied
    #[error("At least one deprecation must be provided")]
    Empty,

    /// Target already carries a decoration record
    #[error("@deprecated_parameters decorator can only be applied once per callable")]
    AlreadyDecorated {
        /// Name of the target callable
        func: String,
    },

    /// Rename target is not a parameter of the callable
    #[error("Parameter '{new_name}' not found in signature of {func}{signature}")]
    ParameterNotFound {
        /// Name of the target callable
        func: String,
        /// Rendered signature of the target callable
        signature: String,
        /// Missing replacement keyword
        new_name: String,
    },

    /// A declarative rule failed validation
    #[error("invalid deprecation rule: {0}")]
    Rule(#[from] RuleError),
}

/// Errors raised when a signature descriptor is malformed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// Two parameters share a name
    #[error("duplicate parameter '{0}'")]
    DuplicateParameter(String),

    /// Parameter kinds out of order
    #[error("parameter '{name}' of kind {kind} cannot follow kind {previous}")]
    KindOrder {
        /// Offending parameter
        name: String,
        /// Its kind
        kind: String,
        /// Kind of the preceding parameter
        previous: String,
    },

    /// More than one `*args` or `**kwargs`
    #[error("signature may contain at most one {0} parameter")]
    DuplicateVariadic(String),

    /// Required positional parameter after one with a default
    #[error("required parameter '{0}' follows a parameter with a default")]
    RequiredAfterDefault(String),

    /// Empty parameter name
    #[error("parameter names must not be empty")]
    EmptyName,
}

/// Errors surfaced to the caller of a callable
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// Keyword not accepted by the signature
    #[error("{func}() got an unexpected keyword argument '{name}'")]
    UnexpectedKeyword {
        /// Callable name
        func: String,
        /// Rejected keyword
        name: String,
    },

    /// Required parameter not supplied
    #[error("{func}() missing required argument: '{name}'")]
    MissingArgument {
        /// Callable name
        func: String,
        /// Missing parameter
        name: String,
    },

    /// More positional arguments than positional parameters
    #[error("{func}() takes {expected} positional arguments but {given} were given")]
    TooManyPositional {
        /// Callable name
        func: String,
        /// Positional capacity
        expected: usize,
        /// Positional arguments supplied
        given: usize,
    },

    /// Parameter bound both positionally and by keyword
    #[error("{func}() got multiple values for argument '{name}'")]
    MultipleValues {
        /// Callable name
        func: String,
        /// Parameter bound twice
        name: String,
    },

    /// Caller supplied both the deprecated keyword and its replacement
    #[error("Unable to reassign '{old_name}' because '{new_name}' is also set")]
    ReassignConflict {
        /// Callable name
        func: String,
        /// Deprecated keyword
        old_name: String,
        /// Replacement keyword
        new_name: String,
    },

    /// Error raised by the wrapped callable itself
    #[error("{0}")]
    Raised(BoxError),
}

impl CallError {
    /// Wrap an error raised inside a callable body
    #[inline]
    pub fn raised(error: impl Into<BoxError>) -> Self {
        Self::Raised(error.into())
    }

    /// Check if this error came from argument binding
    #[inline]
    #[must_use]
    pub fn is_binding_error(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedKeyword { .. }
                | Self::MissingArgument { .. }
                | Self::TooManyPositional { .. }
                | Self::MultipleValues { .. }
        )
    }

    /// Check if this is the deprecated/replacement conflict
    #[inline]
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ReassignConflict { .. })
    }
}

/// Errors loading channel configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML syntax or schema error
    #[error("invalid channel configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for decoration
pub type DecorationResult<T> = Result<T, DecorationError>;

/// Result type alias for invocation
pub type CallResult<T> = Result<T, CallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoration_error_display() {
        assert_eq!(
            DecorationError::Empty.to_string(),
            "At least one deprecation must be provided"
        );
        let err = DecorationError::ParameterNotFound {
            func: "f".into(),
            signature: "()".into(),
            new_name: "new_name".into(),
        };
        assert_eq!(
            err.to_string(),
            "Parameter 'new_name' not found in signature of f()"
        );
    }

    #[test]
    fn conflict_display() {
        let err = CallError::ReassignConflict {
            func: "g".into(),
            old_name: "before".into(),
            new_name: "now".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unable to reassign 'before' because 'now' is also set"
        );
        assert!(err.is_conflict());
        assert!(!err.is_binding_error());
    }

    #[test]
    fn raised_keeps_message() {
        let err = CallError::raised("boom");
        assert_eq!(err.to_string(), "boom");
        assert!(!err.is_conflict());
    }

    #[test]
    fn rule_error_converts() {
        let rule_err = depparam_rule::ParameterRemove::builder().build().unwrap_err();
        let err: DecorationError = rule_err.into();
        assert!(matches!(err, DecorationError::Rule(_)));
    }
}
