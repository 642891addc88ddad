//! Deprecation message templates
//!
//! Provides [`MessageTemplate`], a parsed message with a fixed placeholder set:
//! `%(func)s`, `%(old_name)s`, `%(new_name)s` and `%(when)s`. A literal percent
//! sign is written as `%%`.
//!
//! Templates are parsed once, when a rule is built, so rendering never fails.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Every `%` in a template: `%%`, `%(key)c`, or a bare `%`
///
/// Groups: 1 = escaped percent, 2 = key, 3 = closing paren, 4 = conversion.
static PERCENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)%(?:(%)|\(([^)]*)(\))?(.)?)?").expect("placeholder pattern is valid")
});

/// Placeholder names accepted inside a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// Name of the decorated callable
    Func,
    /// Deprecated keyword name
    OldName,
    /// Replacement keyword name (rename rules only)
    NewName,
    /// Free-text deprecation timing
    When,
}

impl Placeholder {
    /// Placeholder key as written between `%(` and `)s`
    #[inline]
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Func => "func",
            Self::OldName => "old_name",
            Self::NewName => "new_name",
            Self::When => "when",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "func" => Some(Self::Func),
            "old_name" => Some(Self::OldName),
            "new_name" => Some(Self::NewName),
            "when" => Some(Self::When),
            _ => None,
        }
    }
}

impl Display for Placeholder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "%({})s", self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Placeholder),
}

/// Values substituted into a [`MessageTemplate`]
#[derive(Debug, Clone, Copy)]
pub struct MessageContext<'a> {
    /// Callable name
    pub func: &'a str,
    /// Deprecated keyword
    pub old_name: &'a str,
    /// Replacement keyword, if any
    pub new_name: Option<&'a str>,
    /// Deprecation timing
    pub when: &'a str,
}

impl MessageContext<'_> {
    fn value(&self, placeholder: Placeholder) -> &str {
        match placeholder {
            Placeholder::Func => self.func,
            Placeholder::OldName => self.old_name,
            Placeholder::NewName => self.new_name.unwrap_or_default(),
            Placeholder::When => self.when,
        }
    }
}

/// Parsed deprecation message
///
/// # Example
/// ```
/// use depparam_rule::{MessageContext, MessageTemplate};
///
/// let template = MessageTemplate::parse("\"%(old_name)s\" is going away %(when)s").unwrap();
/// let ctx = MessageContext { func: "f", old_name: "x", new_name: None, when: "soon" };
/// assert_eq!(template.render(&ctx), "\"x\" is going away soon");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl MessageTemplate {
    /// Parse template source
    ///
    /// # Errors
    /// Returns [`TemplateError`] for unknown placeholders, unterminated or
    /// non-`s` conversions, and a `%` that starts neither `%(` nor `%%`.
    pub fn parse(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in PERCENT.captures_iter(&source) {
            let Some(whole) = caps.get(0) else { continue };
            let position = whole.start();
            literal.push_str(&source[last..position]);
            last = whole.end();

            if caps.get(1).is_some() {
                literal.push('%');
                continue;
            }
            let Some(key) = caps.get(2).map(|m| m.as_str()) else {
                return Err(TemplateError::StrayPercent { position });
            };
            if caps.get(3).is_none() {
                return Err(TemplateError::UnterminatedPlaceholder { position });
            }

            let placeholder = Placeholder::from_key(key)
                .ok_or_else(|| TemplateError::UnknownPlaceholder(key.to_string()))?;

            match caps.get(4).and_then(|m| m.as_str().chars().next()) {
                Some('s') => {}
                Some(conversion) => {
                    return Err(TemplateError::UnsupportedConversion {
                        key: key.to_string(),
                        conversion,
                    });
                }
                None => return Err(TemplateError::UnterminatedPlaceholder { position }),
            }

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Field(placeholder));
        }

        literal.push_str(&source[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { source, segments })
    }

    /// Original template text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Placeholders referenced by this template, in order of appearance
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Field(p) => Some(*p),
            Segment::Literal(_) => None,
        })
    }

    /// Check whether the template references a placeholder
    #[inline]
    #[must_use]
    pub fn references(&self, placeholder: Placeholder) -> bool {
        self.placeholders().any(|p| p == placeholder)
    }

    /// Substitute context values
    #[must_use]
    pub fn render(&self, ctx: &MessageContext<'_>) -> String {
        let mut out = String::with_capacity(self.source.len() + 32);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(p) => out.push_str(ctx.value(*p)),
            }
        }
        out
    }
}

impl TryFrom<String> for MessageTemplate {
    type Error = TemplateError;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        Self::parse(source)
    }
}

impl From<MessageTemplate> for String {
    fn from(template: MessageTemplate) -> Self {
        template.source
    }
}

impl Display for MessageTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Template parse failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// Placeholder outside the fixed set
    #[error("unknown placeholder '%({0})s', expected one of func, old_name, new_name, when")]
    UnknownPlaceholder(String),

    /// `%(` without a closing `)s`
    #[error("unterminated placeholder at byte {position}")]
    UnterminatedPlaceholder {
        /// Byte offset of the opening `%`
        position: usize,
    },

    /// Conversion other than `s`
    #[error("unsupported conversion '{conversion}' for placeholder '{key}'")]
    UnsupportedConversion {
        /// Placeholder key
        key: String,
        /// Conversion character found
        conversion: char,
    },

    /// `%` not followed by `(` or `%`
    #[error("stray '%' at byte {position}, write '%%' for a literal percent sign")]
    StrayPercent {
        /// Byte offset of the `%`
        position: usize,
    },
}
