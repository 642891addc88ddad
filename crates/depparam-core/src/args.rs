//! Call arguments
//!
//! [`CallArgs`] is the argument set of one dynamic invocation: positional
//! values followed by an ordered keyword mapping.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Positional and keyword arguments of one call
///
/// Keyword order is preserved so rewritten calls forward arguments in a
/// predictable order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallArgs {
    #[serde(default)]
    positional: Vec<Value>,
    #[serde(default)]
    keywords: IndexMap<String, Value>,
}

impl CallArgs {
    /// Create empty argument set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from positional values and keyword pairs
    #[must_use]
    pub fn from_parts(
        positional: Vec<Value>,
        keywords: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        Self {
            positional,
            keywords: keywords.into_iter().collect(),
        }
    }

    /// Append a positional value
    #[inline]
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a keyword value
    #[inline]
    #[must_use]
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.insert(name.into(), value.into());
        self
    }

    /// Positional values
    #[inline]
    #[must_use]
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Keyword mapping
    #[inline]
    #[must_use]
    pub fn keywords(&self) -> &IndexMap<String, Value> {
        &self.keywords
    }

    /// Keyword value by name
    #[inline]
    #[must_use]
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.keywords.get(name)
    }

    /// Check if a keyword was supplied
    #[inline]
    #[must_use]
    pub fn contains_keyword(&self, name: &str) -> bool {
        self.keywords.contains_key(name)
    }

    /// Remove a keyword, keeping the order of the rest
    #[inline]
    pub fn remove_keyword(&mut self, name: &str) -> Option<Value> {
        self.keywords.shift_remove(name)
    }

    /// Insert or replace a keyword
    #[inline]
    pub fn insert_keyword(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.keywords.insert(name.into(), value)
    }

    /// Insert a value in front of the positional arguments
    #[inline]
    pub fn prepend(&mut self, value: Value) {
        self.positional.insert(0, value);
    }

    /// Split into positional values and keyword mapping
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (Vec<Value>, IndexMap<String, Value>) {
        (self.positional, self.keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_collects_values() {
        let args = CallArgs::new().arg(1).arg("two").kwarg("x", true);
        assert_eq!(args.positional(), &[json!(1), json!("two")]);
        assert_eq!(args.keyword("x"), Some(&json!(true)));
        assert!(args.contains_keyword("x"));
        assert!(!args.contains_keyword("y"));
    }

    #[test]
    fn remove_keeps_order() {
        let mut args = CallArgs::new().kwarg("a", 1).kwarg("b", 2).kwarg("c", 3);
        assert_eq!(args.remove_keyword("b"), Some(json!(2)));
        let names: Vec<&str> = args.keywords().keys().map(String::as_str).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn prepend_goes_first() {
        let mut args = CallArgs::new().arg(2);
        args.prepend(json!(1));
        assert_eq!(args.positional(), &[json!(1), json!(2)]);
    }

    #[test]
    fn deserializes_from_json() {
        let args: CallArgs = serde_json::from_value(json!({"keywords": {"now": 6}})).unwrap();
        assert!(args.positional().is_empty());
        assert_eq!(args.keyword("now"), Some(&json!(6)));
    }
}
