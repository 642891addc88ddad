//! Lint configuration

use crate::diagnostic::Severity;
use crate::error::{LintError, LintResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Lint configuration
///
/// ```toml
/// enabled = true
/// severity = "warning"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Run the deprecated-argument check
    pub enabled: bool,
    /// Severity of emitted diagnostics
    pub severity: Severity,
}

impl LintConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With check enabled or disabled
    #[inline]
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// With diagnostic severity
    #[inline]
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Parse from TOML
    ///
    /// # Errors
    /// [`LintError::Config`] on syntax or schema errors.
    pub fn from_toml_str(source: &str) -> LintResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// [`LintError::Io`] or [`LintError::Config`].
    pub fn load(path: impl AsRef<Path>) -> LintResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| LintError::io(path, e))?;
        Self::from_toml_str(&source)
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: Severity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_overrides() {
        let config = LintConfig::from_toml_str(r#"severity = "warning""#).unwrap();
        assert!(config.enabled);
        assert_eq!(config.severity, Severity::Warning);
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            LintConfig::load("/nonexistent/depparam.toml"),
            Err(LintError::Io { .. })
        ));
    }
}
