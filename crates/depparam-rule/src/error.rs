//! Error types for rule construction

use crate::rule::RuleKind;
use crate::template::TemplateError;

/// Errors raised while building a deprecation rule
///
/// Every variant is a configuration error: it surfaces when the rule is
/// declared and never at call time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// Required field not supplied
    #[error("{}() missing {}", .rule, describe_missing(.fields))]
    MissingField {
        /// Rule variant being built
        rule: RuleKind,
        /// Names of the absent fields, in declaration order
        fields: Vec<&'static str>,
    },

    /// Transform outside the variant's legal set
    #[error("transform must be '{}' or None, got '{value}'", .rule.legal_transform())]
    InvalidTransform {
        /// Rule variant being built
        rule: RuleKind,
        /// Offending value
        value: String,
    },

    /// Keyword name is empty
    #[error("{rule}() argument '{field}' must not be empty")]
    EmptyName {
        /// Rule variant being built
        rule: RuleKind,
        /// Field holding the empty name
        field: &'static str,
    },

    /// Rename onto the same keyword
    #[error("ParameterRename() old_name and new_name are both '{name}'")]
    SameName {
        /// Shared name
        name: String,
    },

    /// Message template failed to parse or references an unavailable field
    #[error("invalid message for {rule}(): {source}")]
    Template {
        /// Rule variant being built
        rule: RuleKind,
        /// Underlying template error
        #[source]
        source: TemplateError,
    },
}

impl RuleError {
    /// Create missing-field error
    #[inline]
    #[must_use]
    pub fn missing(rule: RuleKind, fields: Vec<&'static str>) -> Self {
        Self::MissingField { rule, fields }
    }

    /// Create template error
    #[inline]
    #[must_use]
    pub fn template(rule: RuleKind, source: TemplateError) -> Self {
        Self::Template { rule, source }
    }
}

fn describe_missing(fields: &[&'static str]) -> String {
    let quoted: Vec<String> = fields.iter().map(|f| format!("'{f}'")).collect();
    let plural = if fields.len() == 1 { "" } else { "s" };
    let names = match quoted.as_slice() {
        [] => String::new(),
        [one] => one.clone(),
        [head @ .., last] => format!("{} and {}", head.join(", "), last),
    };
    format!(
        "{} required keyword-only argument{}: {}",
        fields.len(),
        plural,
        names
    )
}

/// Result type alias for rule construction
pub type RuleResult<T> = Result<T, RuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_single_field_display() {
        let err = RuleError::missing(RuleKind::Remove, vec!["old_name"]);
        assert_eq!(
            err.to_string(),
            "ParameterRemove() missing 1 required keyword-only argument: 'old_name'"
        );
    }

    #[test]
    fn missing_two_fields_display() {
        let err = RuleError::missing(RuleKind::Rename, vec!["old_name", "new_name"]);
        assert_eq!(
            err.to_string(),
            "ParameterRename() missing 2 required keyword-only arguments: 'old_name' and 'new_name'"
        );
    }

    #[test]
    fn invalid_transform_display() {
        let err = RuleError::InvalidTransform {
            rule: RuleKind::Rename,
            value: "invalid".into(),
        };
        assert!(err
            .to_string()
            .starts_with("transform must be 'reassign' or None"));
    }

    #[test]
    fn template_error_keeps_source() {
        use std::error::Error as _;

        let err = RuleError::template(
            RuleKind::Remove,
            TemplateError::UnknownPlaceholder("x".into()),
        );
        assert!(err.source().is_some());
        assert!(err.to_string().contains("ParameterRemove()"));
    }
}
