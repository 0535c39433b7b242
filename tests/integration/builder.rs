mod common;
use common::{class, code, desc, field, method};

use specmodel::config::DuplicateFixturePolicy;
use specmodel::diagnostics::ParseError;
use specmodel::model::{FixtureRole, MethodKind};
use specmodel::span::Pos;
use specmodel::{build, build_all, build_json, ParserConfig, Specification};

fn stack_spec() -> specmodel::ast::ClassNode {
    class(
        "StackSpec",
        vec![field("stack", 2), field("element", 3), field("capacity", 4)],
        vec![
            method("setup", 6, vec![code(None, "stack = new Stack()", 7)]),
            method(
                "push an element",
                9,
                vec![
                    code(Some("when"), "stack.push(element)", 10),
                    code(Some("then"), "stack.size() == 1", 11),
                ],
            ),
            method("fill", 13, vec![code(None, "capacity.times { stack.push(it) }", 14)]),
            method(
                "pop from empty",
                16,
                vec![
                    desc(Some("expect"), "an empty stack throws", 17),
                    code(None, "stack.empty", 18),
                ],
            ),
        ],
    )
}

#[test]
fn field_ordinals_are_declaration_order() {
    let spec = build(stack_spec(), &ParserConfig::default()).unwrap();
    let ordinals: Vec<(&str, usize)> = spec.fields.iter().map(|f| (f.name.as_str(), f.ordinal)).collect();
    assert_eq!(ordinals, [("stack", 0), ("element", 1), ("capacity", 2)]);
}

#[test]
fn feature_ordinals_skip_helpers_and_fixtures() {
    let spec = build(stack_spec(), &ParserConfig::default()).unwrap();
    let features: Vec<(&str, Option<usize>)> =
        spec.features().map(|m| (m.name.as_str(), m.ordinal())).collect();
    assert_eq!(features, [("push an element", Some(0)), ("pop from empty", Some(1))]);

    // methods keep source order, helpers interleaved
    let order: Vec<&str> = spec.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(order, ["push an element", "fill", "pop from empty"]);
    assert_eq!(spec.method("fill").unwrap().kind, MethodKind::Helper);
}

#[test]
fn field_and_feature_ordinals_are_independent() {
    let c = class(
        "S",
        vec![field("a", 2)],
        vec![
            method("f1", 3, vec![code(Some("expect"), "1", 4)]),
            method("f2", 5, vec![code(Some("expect"), "2", 6)]),
        ],
    );
    let spec = build(c, &ParserConfig::default()).unwrap();
    assert_eq!(spec.fields[0].ordinal, 0);
    assert_eq!(spec.method("f1").unwrap().ordinal(), Some(0));
    assert_eq!(spec.method("f2").unwrap().ordinal(), Some(1));
}

#[test]
fn ignored_fields_do_not_consume_ordinals() {
    let mut internal = field("$internal", 3);
    internal.is_synthetic = true;
    let c = class("S", vec![field("a", 2), internal, field("b", 4)], vec![]);
    let spec = build(c, &ParserConfig::default()).unwrap();
    let ordinals: Vec<usize> = spec.fields.iter().map(|f| f.ordinal).collect();
    assert_eq!(ordinals, [0, 1]);
}

#[test]
fn separate_builds_restart_ordinals() {
    let first = build(stack_spec(), &ParserConfig::default()).unwrap();
    let second = build(stack_spec(), &ParserConfig::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(second.fields[0].ordinal, 0);
    assert_eq!(second.features().next().and_then(|m| m.ordinal()), Some(0));
}

#[test]
fn duplicate_fixture_is_an_error_by_default() {
    let c = class(
        "S",
        vec![],
        vec![method("cleanup", 2, vec![code(None, "a", 3)]), method("cleanup", 5, vec![code(None, "b", 6)])],
    );
    let err = build(c, &ParserConfig::default()).unwrap_err();
    match err {
        ParseError::DuplicateFixture { pos, first, ref msg } => {
            assert_eq!(pos, Pos::new(5, 3));
            assert_eq!(first, Pos::new(2, 3));
            assert_eq!(msg, "Duplicate 'cleanup()' method; a specification may declare at most one");
        }
        other => panic!("expected duplicate fixture error, got {other:?}"),
    }
}

#[test]
fn duplicate_fixture_overwrite_policy_keeps_last() {
    let config = ParserConfig { duplicate_fixtures: DuplicateFixturePolicy::Overwrite, ..ParserConfig::default() };
    let c = class(
        "S",
        vec![],
        vec![method("cleanup", 2, vec![code(None, "a", 3)]), method("cleanup", 5, vec![code(None, "b", 6)])],
    );
    let spec = build(c, &config).unwrap();
    let cleanup = spec.fixture(FixtureRole::Cleanup).unwrap();
    assert_eq!(cleanup.pos, Pos::new(5, 3));
    assert_eq!(cleanup.blocks[0].statements[0].pos.line, 6);
}

#[test]
fn different_fixture_roles_do_not_collide() {
    let c = class("S", vec![], vec![method("setup", 2, vec![]), method("setupSpec", 4, vec![])]);
    let spec = build(c, &ParserConfig::default()).unwrap();
    assert!(spec.setup.is_some());
    assert!(spec.setup_spec.is_some());
}

#[test]
fn build_all_continues_past_failures() {
    let bad = class("Bad", vec![], vec![method("Cleanup", 2, vec![])]);
    let results = build_all(vec![stack_spec(), bad, class("Empty", vec![], vec![])], &ParserConfig::default());
    let summary: Vec<(&str, bool)> = results.iter().map(|(name, r)| (name.as_str(), r.is_ok())).collect();
    assert_eq!(summary, [("StackSpec", true), ("Bad", false), ("Empty", true)]);
}

#[test]
fn concurrent_builds_are_independent() {
    let config = ParserConfig::default();
    let specs: Vec<Specification> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| build(stack_spec(), &config).unwrap())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for spec in &specs {
        assert_eq!(spec, &specs[0]);
    }
}

#[test]
fn build_from_json() {
    let json = r#"{
        "classes": [{
            "name": "JsonSpec",
            "pos": { "line": 1, "column": 1 },
            "fields": [{ "name": "x", "pos": { "line": 2, "column": 3 }, "annotations": ["Shared"] }],
            "methods": [{
                "name": "adds",
                "pos": { "line": 4, "column": 3 },
                "end_pos": { "line": 8, "column": 3 },
                "statements": [
                    { "label": "setup", "pos": { "line": 5, "column": 5 },
                      "stmt": { "kind": "expr", "expr": { "kind": "const", "value": { "string": "two numbers" } } } },
                    { "pos": { "line": 6, "column": 5 },
                      "stmt": { "kind": "other", "text": "def a = 1, b = 2" } },
                    { "label": "expect", "pos": { "line": 7, "column": 5 },
                      "stmt": { "kind": "expr", "expr": { "kind": "code", "text": "a + b == 3" } } }
                ]
            }]
        }]
    }"#;
    let specs = build_json(json, &ParserConfig::default()).unwrap();
    assert_eq!(specs.len(), 1);
    let spec = &specs[0];
    assert_eq!(spec.name, "JsonSpec");
    assert!(spec.fields[0].shared);
    let feature = spec.method("adds").unwrap();
    assert_eq!(feature.blocks[1].descriptions, ["two numbers"]);
    assert_eq!(feature.blocks[1].statements.len(), 1);
    assert_eq!(feature.blocks[2].statements.len(), 1);
}

#[test]
fn model_serializes_to_json() {
    let spec = build(stack_spec(), &ParserConfig::default()).unwrap();
    let value = serde_json::to_value(&spec).unwrap();
    assert_eq!(value["name"], "StackSpec");
    assert_eq!(value["fields"][2]["ordinal"], 2);
    assert_eq!(value["methods"][0]["kind"]["kind"], "feature");
    assert_eq!(value["methods"][0]["blocks"][1]["kind"], "stimulus");
    assert_eq!(value["setup"]["kind"]["role"], "setup");
    assert!(value["cleanup"].is_null());
}
