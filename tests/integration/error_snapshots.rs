//! Snapshot tests for error message formatting.
//!
//! Uses insta to capture rendered diagnostics and detect regressions.
//! Run `cargo insta review` to review changes.

mod common;
use common::{class, code, method, static_method};

use insta::assert_snapshot;
use specmodel::diagnostics::format_error;
use specmodel::{build, ParserConfig};

fn build_error(methods: Vec<specmodel::ast::MethodNode>) -> String {
    let err = build(class("StackSpec", vec![], methods), &ParserConfig::default()).unwrap_err();
    format_error("StackSpec.groovy", &err)
}

#[test]
fn unknown_label_error() {
    let out = build_error(vec![method("f", 2, vec![code(Some("given"), "x", 3)])]);
    assert_snapshot!(out, @"StackSpec.groovy:3:5: error[label]: Unrecognized block label: given");
}

#[test]
fn illegal_successor_error() {
    let out = build_error(vec![method(
        "f",
        2,
        vec![code(Some("when"), "a", 3), code(Some("expect"), "b", 4)],
    )]);
    assert_snapshot!(out, @"StackSpec.groovy:4:5: error[label]: 'expect' is not allowed here; instead, use one of: [then]");
}

#[test]
fn missing_then_error() {
    let out = build_error(vec![method("f", 2, vec![code(Some("when"), "a", 3)])]);
    assert_snapshot!(out, @"StackSpec.groovy:4:3: error[label]: 'end-of-method' is not allowed here; instead, use one of: [then]");
}

#[test]
fn misspelled_fixture_error() {
    let out = build_error(vec![method("setupspec", 2, vec![])]);
    assert_snapshot!(out, @"StackSpec.groovy:2:3: error[naming]: Misspelled 'setupSpec()' method (wrong capitalization)");
}

#[test]
fn static_fixture_error() {
    let out = build_error(vec![static_method("cleanupSpec", 6, vec![])]);
    assert_snapshot!(out, @"StackSpec.groovy:6:3: error[modifier]: Fixture methods must not be static");
}

#[test]
fn duplicate_fixture_error() {
    let out = build_error(vec![method("setup", 2, vec![]), method("setup", 4, vec![])]);
    assert_snapshot!(out, @"StackSpec.groovy:4:3: error[duplicate-fixture]: Duplicate 'setup()' method; a specification may declare at most one");
}

#[test]
fn constructor_error() {
    let mut c = class("StackSpec", vec![], vec![]);
    c.constructors.push(method("<init>", 3, vec![]));
    let err = build(c, &ParserConfig::default()).unwrap_err();
    assert_snapshot!(
        format_error("StackSpec.groovy", &err),
        @"StackSpec.groovy:3:3: error[structure]: Constructors are not allowed; instead, define a 'setup()' or 'setupSpec()' method"
    );
}
