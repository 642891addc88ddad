//! Linter Tests
//!
//! Call-site diagnostics must match the runtime notification text.

use depparam_core::{notify, Callable};
use depparam_lint::{CallSite, DecorationIndex, LintConfig, Linter, Location, Severity};
use depparam_test_utils::{
    func_keyword_parameter_remove, func_keyword_parameter_rename, kwargs, record_of,
};
use pretty_assertions::assert_eq;

fn index_with_fixtures() -> DecorationIndex {
    let mut index = DecorationIndex::new();
    index
        .register_callable("test.func_keyword_parameter_remove", &func_keyword_parameter_remove())
        .unwrap();
    index
        .register_callable("test.func_keyword_parameter_rename", &func_keyword_parameter_rename())
        .unwrap();
    index
}

#[test]
fn test_keyword_parameter_remove() {
    let linter = Linter::new(index_with_fixtures());
    let site = CallSite::new("test.func_keyword_parameter_remove", Location::new("test.py", 8))
        .with_keyword("removed");

    let report = linter.check_all([&site]);
    let out = report.to_string();
    assert!(out.contains(
        "error: Argument \"removed\" for \"func_keyword_parameter_remove\" is deprecated"
    ));
    assert!(out.contains("[deprecated-arg]"));
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn test_keyword_parameter_rename() {
    let linter = Linter::new(index_with_fixtures());
    let site = CallSite::new("test.func_keyword_parameter_rename", Location::new("test.py", 8))
        .with_keyword("before");

    let report = linter.check_all([&site]);
    let out = report.to_string();
    assert!(out.contains(
        "error: Argument \"before\" for \"func_keyword_parameter_rename\" is deprecated"
    ));
    assert!(out.contains("it has been renamed to \"now\" and \"before\" will be removed in the future"));
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn test_current_names_are_clean() {
    let linter = Linter::new(index_with_fixtures());
    let site = CallSite::new("test.func_keyword_parameter_rename", Location::new("test.py", 9))
        .with_keyword("now");

    let report = linter.check_all([&site]);
    assert!(report.diagnostics().is_empty());
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.to_string(), "");
}

#[test]
fn test_lint_message_matches_runtime() {
    let g = func_keyword_parameter_rename();
    let (_, seen) = notify::capture(|| g.call(kwargs([("before", 1)])));

    let (name, record) = record_of(&g);
    let mut index = DecorationIndex::new();
    index.register(format!("pkg.{name}"), record);
    let site = CallSite::new(format!("pkg.{name}"), Location::new("app.py", 3))
        .with_keyword("before");
    let diagnostics = Linter::new(index).check(&site);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, seen[0].message());
}

#[test]
fn test_constructor_uses_type_name() {
    let (_, record) = record_of(&func_keyword_parameter_remove());
    let mut index = DecorationIndex::new();
    index.register("shapes.Widget", record);

    let site = CallSite::new("shapes.Widget", Location::new("test.py", 12)).with_keyword("removed");
    let diagnostics = Linter::new(index).check(&site);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0]
        .message
        .starts_with("Argument \"removed\" for \"Widget\" is deprecated"));
}

#[test]
fn test_manifest_drives_linter() {
    let manifest = index_with_fixtures().to_json().unwrap();
    let config = LintConfig::from_toml_str("severity = \"warning\"").unwrap();
    let linter = Linter::new(DecorationIndex::from_json(&manifest).unwrap()).with_config(config);

    let sites = [
        CallSite::new("test.func_keyword_parameter_remove", Location::new("a.py", 1))
            .with_keyword("removed"),
        CallSite::new("test.func_keyword_parameter_rename", Location::new("b.py", 2))
            .with_keywords(["before", "now"]),
    ];
    let report = linter.check_all(&sites);

    assert_eq!(report.diagnostics().len(), 2);
    assert!(report.diagnostics().iter().all(|d| d.severity == Severity::Warning));
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn test_register_undecorated_fails() {
    let plain = depparam_core::FnCallable::new(
        "plain",
        depparam_core::Signature::empty(),
        |_| Ok(serde_json::Value::Null),
    );
    let mut index = DecorationIndex::new();
    let err = index.register_callable("m.plain", &plain).unwrap_err();
    assert_eq!(err.to_string(), "callable 'plain' is not decorated");
}

#[test]
fn test_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("deprecations.json");
    let config = dir.path().join("depparam.toml");
    std::fs::write(&manifest, index_with_fixtures().to_json().unwrap()).unwrap();
    std::fs::write(&config, "enabled = false\n").unwrap();

    let index = DecorationIndex::load(&manifest).unwrap();
    assert_eq!(index.len(), 2);
    let linter = Linter::new(index).with_config(LintConfig::load(&config).unwrap());
    let site = CallSite::new("test.func_keyword_parameter_remove", Location::new("t.py", 1))
        .with_keyword("removed");
    assert!(linter.check(&site).is_empty());
}

mod properties {
    use depparam_core::{DecorationRecord, Deprecation, ParameterRemove};
    use depparam_lint::{CallSite, DecorationIndex, Linter, Location};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    proptest! {
        #[test]
        fn prop_one_diagnostic_per_supplied_deprecated_keyword(
            deprecated in proptest::collection::btree_set("[a-z]{1,6}", 1..6),
            supplied in proptest::collection::btree_set("[a-z]{1,6}", 0..6),
        ) {
            let rules: Vec<Deprecation> = deprecated
                .iter()
                .map(|name| ParameterRemove::new(name.as_str()).unwrap().into())
                .collect();
            let mut index = DecorationIndex::new();
            index.register("m.f", DecorationRecord::new("f", rules).unwrap());

            let site = CallSite::new("m.f", Location::new("t.py", 1)).with_keywords(supplied.iter().cloned());
            let expected: BTreeSet<&String> = deprecated.intersection(&supplied).collect();
            prop_assert_eq!(Linter::new(index).check(&site).len(), expected.len());
        }
    }
}
