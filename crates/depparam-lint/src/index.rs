//! Index of decoration records by call target
//!
//! The index is the only thing the linter knows about decorated code. It is
//! filled from live callables ([`DecorationIndex::register_callable`]) or
//! loaded from a JSON manifest written earlier with
//! [`DecorationIndex::to_json`].

use crate::error::{LintError, LintResult};
use depparam_core::{Callable, DecorationRecord};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Decoration records keyed by qualified target path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationIndex {
    targets: IndexMap<String, DecorationRecord>,
}

impl DecorationIndex {
    /// Create empty index
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record under `target`
    ///
    /// A decorated constructor goes under its type's path.
    pub fn register(&mut self, target: impl Into<String>, record: DecorationRecord) {
        let target = target.into();
        tracing::debug!(path = %target, rules = record.rules().len(), "Indexed decoration record");
        self.targets.insert(target, record);
    }

    /// Register a decorated callable under `target`
    ///
    /// # Errors
    /// [`LintError::NotDecorated`] if the callable carries no record.
    pub fn register_callable(
        &mut self,
        target: impl Into<String>,
        callable: &dyn Callable,
    ) -> LintResult<()> {
        let record = callable
            .decoration()
            .cloned()
            .ok_or_else(|| LintError::NotDecorated(callable.name().to_string()))?;
        self.register(target, record);
        Ok(())
    }

    /// Record for a target path
    #[inline]
    #[must_use]
    pub fn get(&self, target: &str) -> Option<&DecorationRecord> {
        self.targets.get(target)
    }

    /// Number of indexed targets
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Nothing indexed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Indexed target paths in registration order
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    /// Serialize to a JSON manifest
    ///
    /// # Errors
    /// [`LintError::Manifest`] if serialization fails.
    pub fn to_json(&self) -> LintResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a JSON manifest
    ///
    /// Rules are validated while parsing, exactly as when built in code.
    ///
    /// # Errors
    /// [`LintError::Manifest`] on malformed JSON or invalid rules.
    pub fn from_json(source: &str) -> LintResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load a JSON manifest from disk
    ///
    /// # Errors
    /// [`LintError::Io`] or [`LintError::Manifest`].
    pub fn load(path: impl AsRef<Path>) -> LintResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| LintError::io(path, e))?;
        Self::from_json(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depparam_core::{deprecations, ParameterRemove};
    use pretty_assertions::assert_eq;

    fn record(func: &str) -> DecorationRecord {
        DecorationRecord::new(func, deprecations![ParameterRemove::new("removed").unwrap()])
            .unwrap()
    }

    #[test]
    fn register_and_lookup() {
        let mut index = DecorationIndex::new();
        index.register("pkg.f", record("f"));
        index.register("pkg.Widget", record("__init__"));

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("pkg.f").unwrap().func(), "f");
        assert_eq!(index.get("pkg.Widget").unwrap().func(), "__init__");
        assert!(index.get("pkg.g").is_none());
        assert_eq!(index.targets().collect::<Vec<_>>(), ["pkg.f", "pkg.Widget"]);
    }

    #[test]
    fn manifest_round_trip() {
        let mut index = DecorationIndex::new();
        index.register("pkg.f", record("f"));
        let json = index.to_json().unwrap();
        assert_eq!(DecorationIndex::from_json(&json).unwrap(), index);
    }

    #[test]
    fn manifest_validates_rules() {
        let json = r#"{"targets": {"f": {"func": "f", "rules": [{"kind": "remove"}]}}}"#;
        let err = DecorationIndex::from_json(json).unwrap_err();
        assert!(err.to_string().contains("missing 1 required keyword-only argument"));
    }

    #[test]
    fn manifest_rejects_empty_record() {
        let json = r#"{"targets": {"m.f": {"func": "f", "rules": []}}}"#;
        let err = DecorationIndex::from_json(json).unwrap_err();
        assert!(matches!(err, LintError::Manifest(_)));
        assert!(err
            .to_string()
            .contains("At least one deprecation must be provided"));
    }
}
