//! Lint diagnostics and reports

use crate::call_site::Location;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Error code attached to deprecated-argument diagnostics
pub const DEPRECATED_ARG: &str = "deprecated-arg";

/// Diagnostic severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational
    Note,
    /// Reported, does not fail the run
    Warning,
    /// Fails the run
    #[default]
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Note => "note",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// One diagnostic at a call site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintDiagnostic {
    /// Error code
    pub code: String,
    /// Severity
    pub severity: Severity,
    /// Call location
    pub location: Location,
    /// Rendered message
    pub message: String,
}

impl LintDiagnostic {
    /// Create `deprecated-arg` diagnostic
    #[must_use]
    pub fn deprecated_arg(severity: Severity, location: Location, message: String) -> Self {
        Self {
            code: DEPRECATED_ARG.to_string(),
            severity,
            location,
            message,
        }
    }
}

impl Display for LintDiagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}  [{}]",
            self.location, self.severity, self.message, self.code
        )
    }
}

/// Diagnostics from one lint run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintReport {
    diagnostics: Vec<LintDiagnostic>,
}

impl LintReport {
    /// Create empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add diagnostics
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = LintDiagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// All diagnostics in report order
    #[inline]
    #[must_use]
    pub fn diagnostics(&self) -> &[LintDiagnostic] {
        &self.diagnostics
    }

    /// Number of error-severity diagnostics
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Process exit code: 1 if any error was reported
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(self.error_count() > 0)
    }

    /// Summary line, `None` when there are no errors
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        let errors = self.error_count();
        if errors == 0 {
            return None;
        }
        let mut files: Vec<&str> = self
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| d.location.file.as_str())
            .collect();
        files.sort_unstable();
        files.dedup();
        Some(format!(
            "Found {errors} error{} in {} file{}",
            plural(errors),
            files.len(),
            plural(files.len())
        ))
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

impl Display for LintReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{diagnostic}")?;
        }
        if let Some(summary) = self.summary() {
            writeln!(f, "{summary}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn diagnostic(severity: Severity, file: &str) -> LintDiagnostic {
        LintDiagnostic::deprecated_arg(severity, Location::new(file, 8), "msg".into())
    }

    #[test]
    fn display_format() {
        assert_eq!(
            diagnostic(Severity::Error, "test.py").to_string(),
            "test.py:8: error: msg  [deprecated-arg]"
        );
    }

    #[test]
    fn exit_code_follows_errors() {
        let mut report = LintReport::new();
        assert_eq!(report.exit_code(), 0);
        report.extend([diagnostic(Severity::Warning, "a.py")]);
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.summary(), None);
        report.extend([
            diagnostic(Severity::Error, "a.py"),
            diagnostic(Severity::Error, "a.py"),
        ]);
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.summary().as_deref(), Some("Found 2 errors in 1 file"));
    }
}
