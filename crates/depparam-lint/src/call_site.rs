//! Call-site descriptions

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Source position of a call
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path as reported
    pub file: String,
    /// 1-based line
    pub line: u32,
}

impl Location {
    /// Create location
    #[inline]
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// One call expression: its callee and the keyword names it supplies
///
/// `target` is a dotted path (`module.func`, `Type.method`, or `Type` for a
/// constructor call). Only keyword names matter; values are never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    /// Qualified callee path
    pub target: String,
    /// Keyword names in call order
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Where the call appears
    pub location: Location,
}

impl CallSite {
    /// Create call site without keywords
    #[must_use]
    pub fn new(target: impl Into<String>, location: Location) -> Self {
        Self {
            target: target.into(),
            keywords: Vec::new(),
            location,
        }
    }

    /// With one more keyword
    #[must_use]
    pub fn with_keyword(mut self, name: impl Into<String>) -> Self {
        self.keywords.push(name.into());
        self
    }

    /// With keywords
    #[must_use]
    pub fn with_keywords<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(names.into_iter().map(Into::into));
        self
    }

    /// Callee name as the checker reports it (last path segment)
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.target.rsplit('.').next().unwrap_or(&self.target)
    }

    /// Check whether the call supplies `name`
    #[inline]
    #[must_use]
    pub fn has_keyword(&self, name: &str) -> bool {
        self.keywords.iter().any(|k| k == name)
    }
}
