//! Rule factory and validators
//!
//! Builders collect optional fields and validate everything in `build()`:
//! required names, transform legality and message templates. Omitted
//! `message`, `when` and `transform` fall back to the shared defaults in
//! [`crate::rule`].

use crate::error::{RuleError, RuleResult};
use crate::rule::{ParameterRemove, ParameterRename, RuleKind, Transform, DEFAULT_WHEN};
use crate::template::{MessageTemplate, Placeholder, TemplateError};

/// Transform as supplied by the caller, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum TransformArg {
    /// Not supplied, use the variant default
    #[default]
    Default,
    /// Supplied by name, `None` disables the transform
    Named(Option<String>),
}

/// Builder for [`ParameterRemove`]
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ParameterRemoveBuilder {
    old_name: Option<String>,
    message: Option<String>,
    when: Option<String>,
    transform: TransformArg,
}

/// Builder for [`ParameterRename`]
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ParameterRenameBuilder {
    old_name: Option<String>,
    new_name: Option<String>,
    message: Option<String>,
    when: Option<String>,
    transform: TransformArg,
}

impl ParameterRemove {
    /// Start building a remove rule
    #[inline]
    pub fn builder() -> ParameterRemoveBuilder {
        ParameterRemoveBuilder::default()
    }

    /// Build a remove rule with all defaults
    ///
    /// # Errors
    /// Fails when `old_name` is empty.
    pub fn new(old_name: impl Into<String>) -> RuleResult<Self> {
        Self::builder().old_name(old_name).build()
    }
}

impl ParameterRename {
    /// Start building a rename rule
    #[inline]
    pub fn builder() -> ParameterRenameBuilder {
        ParameterRenameBuilder::default()
    }

    /// Build a rename rule with all defaults
    ///
    /// # Errors
    /// Fails when a name is empty or both names are equal.
    pub fn new(old_name: impl Into<String>, new_name: impl Into<String>) -> RuleResult<Self> {
        Self::builder().old_name(old_name).new_name(new_name).build()
    }
}

impl ParameterRemoveBuilder {
    /// Deprecated keyword (required)
    pub fn old_name(mut self, name: impl Into<String>) -> Self {
        self.old_name = Some(name.into());
        self
    }

    /// Custom message template
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Deprecation timing text
    pub fn when(mut self, when: impl Into<String>) -> Self {
        self.when = Some(when.into());
        self
    }

    /// Transform by name; `None` forwards the keyword untouched
    pub fn transform(mut self, transform: Option<&str>) -> Self {
        self.transform = TransformArg::Named(transform.map(str::to_string));
        self
    }

    /// Transform as a typed policy
    pub fn transform_policy(mut self, transform: Option<Transform>) -> Self {
        self.transform = TransformArg::Named(transform.map(|t| t.as_str().to_string()));
        self
    }

    /// Validate and build
    ///
    /// # Errors
    /// - [`RuleError::MissingField`] without `old_name`
    /// - [`RuleError::InvalidTransform`] for anything but `"remove"` or `None`
    /// - [`RuleError::Template`] for a malformed message
    pub fn build(self) -> RuleResult<ParameterRemove> {
        const KIND: RuleKind = RuleKind::Remove;

        let old_name = self
            .old_name
            .ok_or_else(|| RuleError::missing(KIND, vec!["old_name"]))?;
        require_name(KIND, "old_name", &old_name)?;

        Ok(ParameterRemove {
            old_name,
            transform: resolve_transform(KIND, self.transform)?,
            message: resolve_message(KIND, self.message)?,
            when: self.when.unwrap_or_else(|| DEFAULT_WHEN.to_string()),
        })
    }
}

impl ParameterRenameBuilder {
    /// Deprecated keyword (required)
    pub fn old_name(mut self, name: impl Into<String>) -> Self {
        self.old_name = Some(name.into());
        self
    }

    /// Replacement keyword (required)
    pub fn new_name(mut self, name: impl Into<String>) -> Self {
        self.new_name = Some(name.into());
        self
    }

    /// Custom message template
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Deprecation timing text
    pub fn when(mut self, when: impl Into<String>) -> Self {
        self.when = Some(when.into());
        self
    }

    /// Transform by name; `None` forwards the old keyword untouched
    pub fn transform(mut self, transform: Option<&str>) -> Self {
        self.transform = TransformArg::Named(transform.map(str::to_string));
        self
    }

    /// Transform as a typed policy
    pub fn transform_policy(mut self, transform: Option<Transform>) -> Self {
        self.transform = TransformArg::Named(transform.map(|t| t.as_str().to_string()));
        self
    }

    /// Validate and build
    ///
    /// # Errors
    /// - [`RuleError::MissingField`] without `old_name` and/or `new_name`
    /// - [`RuleError::SameName`] when both names are equal
    /// - [`RuleError::InvalidTransform`] for anything but `"reassign"` or `None`
    /// - [`RuleError::Template`] for a malformed message
    pub fn build(self) -> RuleResult<ParameterRename> {
        const KIND: RuleKind = RuleKind::Rename;

        let (old_name, new_name) = match (self.old_name, self.new_name) {
            (Some(old), Some(new)) => (old, new),
            (old, new) => {
                let mut missing = Vec::new();
                if old.is_none() {
                    missing.push("old_name");
                }
                if new.is_none() {
                    missing.push("new_name");
                }
                return Err(RuleError::missing(KIND, missing));
            }
        };
        require_name(KIND, "old_name", &old_name)?;
        require_name(KIND, "new_name", &new_name)?;
        if old_name == new_name {
            return Err(RuleError::SameName { name: old_name });
        }

        Ok(ParameterRename {
            old_name,
            new_name,
            transform: resolve_transform(KIND, self.transform)?,
            message: resolve_message(KIND, self.message)?,
            when: self.when.unwrap_or_else(|| DEFAULT_WHEN.to_string()),
        })
    }
}

fn require_name(rule: RuleKind, field: &'static str, value: &str) -> RuleResult<()> {
    if value.is_empty() {
        return Err(RuleError::EmptyName { rule, field });
    }
    Ok(())
}

/// Check a transform against the variant's legal set
fn resolve_transform(rule: RuleKind, arg: TransformArg) -> RuleResult<Option<Transform>> {
    match arg {
        TransformArg::Default => Ok(Some(rule.legal_transform())),
        TransformArg::Named(None) => Ok(None),
        TransformArg::Named(Some(value)) => match value.parse::<Transform>() {
            Ok(t) if t == rule.legal_transform() => Ok(Some(t)),
            _ => Err(RuleError::InvalidTransform { rule, value }),
        },
    }
}

/// Parse the message and make sure it only uses fields the variant provides
fn resolve_message(rule: RuleKind, message: Option<String>) -> RuleResult<MessageTemplate> {
    let source = message.unwrap_or_else(|| rule.default_message().to_string());
    let template = MessageTemplate::parse(source).map_err(|e| RuleError::template(rule, e))?;

    if rule == RuleKind::Remove && template.references(Placeholder::NewName) {
        return Err(RuleError::template(
            rule,
            TemplateError::UnknownPlaceholder(Placeholder::NewName.key().to_string()),
        ));
    }
    Ok(template)
}

impl TransformArg {
    /// Outer `None` means not supplied, inner `None` disables
    fn from_option(value: Option<Option<String>>) -> Self {
        match value {
            None => Self::Default,
            Some(named) => Self::Named(named),
        }
    }
}

impl ParameterRemoveBuilder {
    pub(crate) fn raw_transform(mut self, value: Option<Option<String>>) -> Self {
        self.transform = TransformArg::from_option(value);
        self
    }

    pub(crate) fn maybe_old_name(mut self, value: Option<String>) -> Self {
        self.old_name = value;
        self
    }

    pub(crate) fn maybe_message(mut self, value: Option<String>) -> Self {
        self.message = value;
        self
    }

    pub(crate) fn maybe_when(mut self, value: Option<String>) -> Self {
        self.when = value;
        self
    }
}

impl ParameterRenameBuilder {
    pub(crate) fn raw_transform(mut self, value: Option<Option<String>>) -> Self {
        self.transform = TransformArg::from_option(value);
        self
    }

    pub(crate) fn maybe_old_name(mut self, value: Option<String>) -> Self {
        self.old_name = value;
        self
    }

    pub(crate) fn maybe_new_name(mut self, value: Option<String>) -> Self {
        self.new_name = value;
        self
    }

    pub(crate) fn maybe_message(mut self, value: Option<String>) -> Self {
        self.message = value;
        self
    }

    pub(crate) fn maybe_when(mut self, value: Option<String>) -> Self {
        self.when = value;
        self
    }
}
