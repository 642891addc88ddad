//! Deprecation rules
//!
//! Provides the two rule variants, [`ParameterRemove`] and [`ParameterRename`],
//! and the [`Deprecation`] sum type the decoration engine stores.
//!
//! Rules are immutable once built. The only way to obtain one is through the
//! builders in [`crate::factory`] (or deserialization, which runs the same
//! validation), so every instance in circulation is valid.

use crate::spec::RuleSpec;
use crate::template::{MessageContext, MessageTemplate};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Default deprecation timing
pub const DEFAULT_WHEN: &str = "in the future";

/// Default message for removed parameters
pub const DEFAULT_REMOVE_MESSAGE: &str =
    "Argument \"%(old_name)s\" for \"%(func)s\" is deprecated and will be removed %(when)s";

/// Default message for renamed parameters
pub const DEFAULT_RENAME_MESSAGE: &str = "Argument \"%(old_name)s\" for \"%(func)s\" is deprecated, \
     it has been renamed to \"%(new_name)s\" and \"%(old_name)s\" will be removed %(when)s";

/// Rule variant discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Parameter removed
    Remove,
    /// Parameter renamed
    Rename,
}

impl RuleKind {
    /// Constructor name used in diagnostics
    #[inline]
    #[must_use]
    pub fn constructor_name(self) -> &'static str {
        match self {
            Self::Remove => "ParameterRemove",
            Self::Rename => "ParameterRename",
        }
    }

    /// The single non-`None` transform this variant accepts
    #[inline]
    #[must_use]
    pub fn legal_transform(self) -> Transform {
        match self {
            Self::Remove => Transform::Remove,
            Self::Rename => Transform::Reassign,
        }
    }

    /// Default message template source
    #[inline]
    #[must_use]
    pub fn default_message(self) -> &'static str {
        match self {
            Self::Remove => DEFAULT_REMOVE_MESSAGE,
            Self::Rename => DEFAULT_RENAME_MESSAGE,
        }
    }
}

impl Display for RuleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.constructor_name())
    }
}

/// Argument transform applied when a deprecated keyword is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Drop the deprecated keyword before forwarding
    Remove,
    /// Move the value to the replacement keyword
    Reassign,
}

impl Transform {
    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remove => "remove",
            Self::Reassign => "reassign",
        }
    }
}

impl Display for Transform {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remove" => Ok(Self::Remove),
            "reassign" => Ok(Self::Reassign),
            other => Err(other.to_string()),
        }
    }
}

/// A keyword parameter that has been removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterRemove {
    pub(crate) old_name: String,
    pub(crate) message: MessageTemplate,
    pub(crate) when: String,
    pub(crate) transform: Option<Transform>,
}

impl ParameterRemove {
    /// Deprecated keyword
    #[inline]
    #[must_use]
    pub fn old_name(&self) -> &str {
        &self.old_name
    }

    /// Message template
    #[inline]
    #[must_use]
    pub fn message(&self) -> &MessageTemplate {
        &self.message
    }

    /// Deprecation timing
    #[inline]
    #[must_use]
    pub fn when(&self) -> &str {
        &self.when
    }

    /// `Some(Transform::Remove)` or `None`
    #[inline]
    #[must_use]
    pub fn transform(&self) -> Option<Transform> {
        self.transform
    }
}

/// A keyword parameter that has been renamed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterRename {
    pub(crate) old_name: String,
    pub(crate) new_name: String,
    pub(crate) message: MessageTemplate,
    pub(crate) when: String,
    pub(crate) transform: Option<Transform>,
}

impl ParameterRename {
    /// Deprecated keyword
    #[inline]
    #[must_use]
    pub fn old_name(&self) -> &str {
        &self.old_name
    }

    /// Replacement keyword
    #[inline]
    #[must_use]
    pub fn new_name(&self) -> &str {
        &self.new_name
    }

    /// Message template
    #[inline]
    #[must_use]
    pub fn message(&self) -> &MessageTemplate {
        &self.message
    }

    /// Deprecation timing
    #[inline]
    #[must_use]
    pub fn when(&self) -> &str {
        &self.when
    }

    /// `Some(Transform::Reassign)` or `None`
    #[inline]
    #[must_use]
    pub fn transform(&self) -> Option<Transform> {
        self.transform
    }
}

/// One parameter deprecation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleSpec", into = "RuleSpec")]
pub enum Deprecation {
    /// Removed parameter
    Remove(ParameterRemove),
    /// Renamed parameter
    Rename(ParameterRename),
}

impl Deprecation {
    /// Variant discriminant
    #[inline]
    #[must_use]
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Remove(_) => RuleKind::Remove,
            Self::Rename(_) => RuleKind::Rename,
        }
    }

    /// Deprecated keyword
    #[inline]
    #[must_use]
    pub fn old_name(&self) -> &str {
        match self {
            Self::Remove(r) => &r.old_name,
            Self::Rename(r) => &r.old_name,
        }
    }

    /// Replacement keyword for rename rules
    #[inline]
    #[must_use]
    pub fn new_name(&self) -> Option<&str> {
        match self {
            Self::Remove(_) => None,
            Self::Rename(r) => Some(&r.new_name),
        }
    }

    /// Message template
    #[inline]
    #[must_use]
    pub fn message(&self) -> &MessageTemplate {
        match self {
            Self::Remove(r) => &r.message,
            Self::Rename(r) => &r.message,
        }
    }

    /// Deprecation timing
    #[inline]
    #[must_use]
    pub fn when(&self) -> &str {
        match self {
            Self::Remove(r) => &r.when,
            Self::Rename(r) => &r.when,
        }
    }

    /// Configured transform, `None` when disabled
    #[inline]
    #[must_use]
    pub fn transform(&self) -> Option<Transform> {
        match self {
            Self::Remove(r) => r.transform,
            Self::Rename(r) => r.transform,
        }
    }

    /// Render the notification text for a call to `func`
    #[must_use]
    pub fn render_message(&self, func: &str) -> String {
        self.message().render(&MessageContext {
            func,
            old_name: self.old_name(),
            new_name: self.new_name(),
            when: self.when(),
        })
    }
}

impl From<ParameterRemove> for Deprecation {
    fn from(rule: ParameterRemove) -> Self {
        Self::Remove(rule)
    }
}

impl From<ParameterRename> for Deprecation {
    fn from(rule: ParameterRename) -> Self {
        Self::Rename(rule)
    }
}
