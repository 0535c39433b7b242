//! Member classification: decides what each declaration of a specification
//! class becomes, and rejects declarations that can never be valid.

use crate::ast::{ClassNode, FieldNode, MethodNode};
use crate::config::ParserConfig;
use crate::diagnostics::ParseError;
use crate::model::FixtureRole;
use crate::span::Spanned;

/// A declaration handed to the classifier.
#[derive(Debug, Clone, Copy)]
pub enum Member<'a> {
    Field(&'a FieldNode),
    Constructor(&'a MethodNode),
    Method(&'a MethodNode),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Ignored,
    Field {
        shared: bool,
        owner: Option<Spanned<String>>,
    },
    Fixture(FixtureRole),
    Feature,
    Helper,
}

pub fn classify(member: Member<'_>, class: &ClassNode, config: &ParserConfig) -> Result<Verdict, ParseError> {
    match member {
        Member::Field(field) => Ok(classify_field(field, class, config)),
        Member::Constructor(ctor) => {
            check_constructor(ctor)?;
            Ok(Verdict::Ignored)
        }
        Member::Method(method) => classify_method(method),
    }
}

pub fn classify_field(field: &FieldNode, class: &ClassNode, config: &ParserConfig) -> Verdict {
    // Internal fields aren't always marked synthetic
    if !config.internal_prefix.is_empty() && field.name.starts_with(&config.internal_prefix) {
        return Verdict::Ignored;
    }

    let owner = class.property(&field.name);
    if owner.is_none() && (field.is_static || field.is_synthetic) {
        return Verdict::Ignored;
    }

    Verdict::Field {
        shared: field.annotations.iter().any(|a| config.is_shared_annotation(a)),
        owner: owner.map(|p| Spanned::new(p.name.clone(), p.pos)),
    }
}

/// Constructors are only allowed when the front-end inserted them.
pub fn check_constructor(ctor: &MethodNode) -> Result<(), ParseError> {
    if ctor.is_synthetic {
        return Ok(());
    }
    Err(ParseError::structural(
        "Constructors are not allowed; instead, define a 'setup()' or 'setupSpec()' method",
        ctor.pos,
    ))
}

pub fn classify_method(method: &MethodNode) -> Result<Verdict, ParseError> {
    if method.is_synthetic {
        return Ok(Verdict::Ignored);
    }
    if let Some(role) = fixture_role(method)? {
        return Ok(Verdict::Fixture(role));
    }
    if is_feature_method(method)? {
        return Ok(Verdict::Feature);
    }
    Ok(Verdict::Helper)
}

// TODO: detect misspellings beyond capitalization (edit distance to the fixture names)
fn fixture_role(method: &MethodNode) -> Result<Option<FixtureRole>, ParseError> {
    for role in FixtureRole::ALL {
        let fm_name = role.method_name();
        if !eq_ignore_case(fm_name, &method.name) {
            continue;
        }
        if fm_name != method.name {
            return Err(ParseError::naming(
                format!("Misspelled '{fm_name}()' method (wrong capitalization)"),
                method.pos,
            ));
        }
        if method.is_static {
            return Err(ParseError::modifier("Fixture methods must not be static", method.pos));
        }
        return Ok(Some(role));
    }
    Ok(None)
}

/// Case-insensitive comparison one char at a time: chars match when equal,
/// when their uppercase forms are equal, or when the lowercase forms of those
/// are. Folds `ſ` to `s` and the Kelvin sign to `k`, unlike ASCII folding.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count() && a.chars().zip(b.chars()).all(|(x, y)| chars_eq_ignore_case(x, y))
}

fn chars_eq_ignore_case(x: char, y: char) -> bool {
    if x == y {
        return true;
    }
    let (ux, uy) = (simple_upper(x), simple_upper(y));
    ux == uy || simple_lower(ux) == simple_lower(uy)
}

/// Single-char case mappings; chars whose mapping expands (`ß` to `SS`) map
/// to themselves.
fn simple_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn simple_lower(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// A method is a feature as soon as one top-level statement carries a label.
fn is_feature_method(method: &MethodNode) -> Result<bool, ParseError> {
    if !method.has_labels() {
        return Ok(false);
    }
    if method.is_static {
        return Err(ParseError::modifier("Feature methods must not be static", method.pos));
    }
    Ok(true)
}
