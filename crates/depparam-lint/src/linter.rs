//! Deprecated-argument checker
//!
//! Reproduces the runtime notifications at call sites: one diagnostic per
//! rule, in declaration order, whose deprecated keyword the call supplies.
//! Messages come from the same templates and defaults as the runtime, with
//! `func` set to the callee name as written at the call site.

use crate::call_site::CallSite;
use crate::config::LintConfig;
use crate::diagnostic::{LintDiagnostic, LintReport};
use crate::index::DecorationIndex;

/// Checks call sites against a [`DecorationIndex`]
#[derive(Debug, Clone, Default)]
pub struct Linter {
    index: DecorationIndex,
    config: LintConfig,
}

impl Linter {
    /// Create with default configuration
    #[must_use]
    pub fn new(index: DecorationIndex) -> Self {
        Self {
            index,
            config: LintConfig::default(),
        }
    }

    /// With configuration
    #[must_use]
    pub fn with_config(mut self, config: LintConfig) -> Self {
        self.config = config;
        self
    }

    /// Index in use
    #[inline]
    #[must_use]
    pub fn index(&self) -> &DecorationIndex {
        &self.index
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Diagnostics for one call site
    #[must_use]
    pub fn check(&self, site: &CallSite) -> Vec<LintDiagnostic> {
        if !self.config.enabled {
            return Vec::new();
        }
        let Some(record) = self.index.get(&site.target) else {
            return Vec::new();
        };

        let func = site.display_name();
        record
            .rules()
            .iter()
            .filter(|rule| site.has_keyword(rule.old_name()))
            .map(|rule| {
                let diagnostic = LintDiagnostic::deprecated_arg(
                    self.config.severity,
                    site.location.clone(),
                    rule.render_message(func),
                );
                tracing::debug!(location = %diagnostic.location, old_name = rule.old_name(), "Deprecated argument at call site");
                diagnostic
            })
            .collect()
    }

    /// Check every call site into one report
    pub fn check_all<'a>(&self, sites: impl IntoIterator<Item = &'a CallSite>) -> LintReport {
        let mut report = LintReport::new();
        for site in sites {
            report.extend(self.check(site));
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call_site::Location;
    use crate::diagnostic::Severity;
    use depparam_core::{deprecations, DecorationRecord, ParameterRemove, ParameterRename};
    use pretty_assertions::assert_eq;

    fn linter() -> Linter {
        let mut index = DecorationIndex::new();
        index.register(
            "m.f",
            DecorationRecord::new(
                "f",
                deprecations![
                    ParameterRemove::new("gone").unwrap(),
                    ParameterRename::new("before", "now").unwrap(),
                ],
            )
            .unwrap(),
        );
        Linter::new(index)
    }

    fn site(keywords: &[&str]) -> CallSite {
        CallSite::new("m.f", Location::new("t.py", 3)).with_keywords(keywords.iter().copied())
    }

    #[test]
    fn one_diagnostic_per_matching_rule_in_rule_order() {
        let diagnostics = linter().check(&site(&["before", "x", "gone"]));
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].message.starts_with("Argument \"gone\" for \"f\""));
        assert!(diagnostics[1].message.starts_with("Argument \"before\" for \"f\""));
    }

    #[test]
    fn no_match_no_diagnostic() {
        assert!(linter().check(&site(&["now"])).is_empty());
        let unknown = CallSite::new("m.g", Location::new("t.py", 1)).with_keyword("gone");
        assert!(linter().check(&unknown).is_empty());
    }

    #[test]
    fn disabled_config_is_silent() {
        let linter = linter().with_config(LintConfig::new().with_enabled(false));
        assert!(linter.check(&site(&["gone"])).is_empty());
    }

    #[test]
    fn severity_from_config() {
        let linter = linter().with_config(LintConfig::new().with_severity(Severity::Warning));
        let report = linter.check_all([&site(&["gone"])]);
        assert_eq!(report.diagnostics()[0].severity, Severity::Warning);
        assert_eq!(report.exit_code(), 0);
    }
}
