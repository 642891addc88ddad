//! Declarative rule form
//!
//! [`RuleSpec`] is the serialized shape of a [`Deprecation`]. Converting a spec
//! into a rule runs the builders, so a rule set loaded from JSON or TOML is
//! validated exactly like one written in code.
//!
//! ```toml
//! [[rules]]
//! kind = "rename"
//! old_name = "before"
//! new_name = "now"
//! when = "in 2.0"
//! ```

use crate::error::RuleError;
use crate::rule::{Deprecation, ParameterRemove, ParameterRename};
use serde::{Deserialize, Deserializer, Serialize};

/// Serialized rule, tagged by `kind`
///
/// `transform` distinguishes "absent" (variant default) from an explicit
/// `null` (transform disabled).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSpec {
    /// Removed parameter
    Remove {
        /// Deprecated keyword
        #[serde(default)]
        old_name: Option<String>,
        /// Message template
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        /// Deprecation timing
        #[serde(default, skip_serializing_if = "Option::is_none")]
        when: Option<String>,
        /// Transform, `null` disables
        #[serde(
            default,
            deserialize_with = "explicit_option",
            skip_serializing_if = "Option::is_none"
        )]
        transform: Option<Option<String>>,
    },
    /// Renamed parameter
    Rename {
        /// Deprecated keyword
        #[serde(default)]
        old_name: Option<String>,
        /// Replacement keyword
        #[serde(default)]
        new_name: Option<String>,
        /// Message template
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        /// Deprecation timing
        #[serde(default, skip_serializing_if = "Option::is_none")]
        when: Option<String>,
        /// Transform, `null` disables
        #[serde(
            default,
            deserialize_with = "explicit_option",
            skip_serializing_if = "Option::is_none"
        )]
        transform: Option<Option<String>>,
    },
}

fn explicit_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl TryFrom<RuleSpec> for Deprecation {
    type Error = RuleError;

    fn try_from(spec: RuleSpec) -> Result<Self, Self::Error> {
        match spec {
            RuleSpec::Remove {
                old_name,
                message,
                when,
                transform,
            } => ParameterRemove::builder()
                .maybe_old_name(old_name)
                .maybe_message(message)
                .maybe_when(when)
                .raw_transform(transform)
                .build()
                .map(Self::Remove),
            RuleSpec::Rename {
                old_name,
                new_name,
                message,
                when,
                transform,
            } => ParameterRename::builder()
                .maybe_old_name(old_name)
                .maybe_new_name(new_name)
                .maybe_message(message)
                .maybe_when(when)
                .raw_transform(transform)
                .build()
                .map(Self::Rename),
        }
    }
}

impl From<Deprecation> for RuleSpec {
    fn from(rule: Deprecation) -> Self {
        match rule {
            Deprecation::Remove(r) => Self::Remove {
                old_name: Some(r.old_name),
                message: Some(r.message.into()),
                when: Some(r.when),
                transform: Some(r.transform.map(|t| t.as_str().to_string())),
            },
            Deprecation::Rename(r) => Self::Rename {
                old_name: Some(r.old_name),
                new_name: Some(r.new_name),
                message: Some(r.message.into()),
                when: Some(r.when),
                transform: Some(r.transform.map(|t| t.as_str().to_string())),
            },
        }
    }
}

/// Parse a list of rule specs into validated rules
///
/// # Errors
/// Returns the first [`RuleError`] in declaration order.
pub fn rules_from_specs(
    specs: impl IntoIterator<Item = RuleSpec>,
) -> Result<Vec<Deprecation>, RuleError> {
    specs.into_iter().map(Deprecation::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{RuleKind, Transform};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Deserialize)]
    struct RuleFile {
        rules: Vec<Deprecation>,
    }

    #[test]
    fn json_remove_defaults() {
        let rule: Deprecation = serde_json::from_str(r#"{"kind": "remove", "old_name": "x"}"#).unwrap();
        assert_eq!(rule.kind(), RuleKind::Remove);
        assert_eq!(rule.transform(), Some(Transform::Remove));
    }

    #[test]
    fn json_null_transform_disables() {
        let rule: Deprecation = serde_json::from_str(
            r#"{"kind": "rename", "old_name": "a", "new_name": "b", "transform": null}"#,
        )
        .unwrap();
        assert_eq!(rule.transform(), None);
    }

    #[test]
    fn json_validation_runs() {
        let err = serde_json::from_str::<Deprecation>(r#"{"kind": "rename", "old_name": "a"}"#)
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("missing 1 required keyword-only argument: 'new_name'"));

        let err = serde_json::from_str::<Deprecation>(
            r#"{"kind": "remove", "old_name": "a", "transform": "reassign"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("transform must be 'remove' or None"));
    }

    #[test]
    fn json_roundtrip_preserves_rule() {
        let rule = Deprecation::from(
            ParameterRename::builder()
                .old_name("a")
                .new_name("b")
                .when("in v2")
                .transform(None)
                .build()
                .unwrap(),
        );
        let json = serde_json::to_string(&rule).unwrap();
        let back: Deprecation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }

    #[test]
    fn toml_rule_file() {
        let file: RuleFile = toml::from_str(
            r#"
            [[rules]]
            kind = "remove"
            old_name = "verbose"

            [[rules]]
            kind = "rename"
            old_name = "before"
            new_name = "now"
            when = "in 2.0"
            "#,
        )
        .unwrap();

        assert_eq!(file.rules.len(), 2);
        assert_eq!(file.rules[1].new_name(), Some("now"));
        assert_eq!(file.rules[1].when(), "in 2.0");
    }

    #[test]
    fn rules_from_specs_stops_at_first_error() {
        let specs = vec![
            RuleSpec::Remove {
                old_name: Some("ok".into()),
                message: None,
                when: None,
                transform: None,
            },
            RuleSpec::Remove {
                old_name: None,
                message: None,
                when: None,
                transform: None,
            },
        ];
        assert!(matches!(
            rules_from_specs(specs),
            Err(RuleError::MissingField { .. })
        ));
    }
}
