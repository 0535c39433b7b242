//! Builds a `Specification` from the syntax tree of one class.

use crate::ast::{ClassNode, FieldNode, MethodNode};
use crate::blocks;
use crate::classify::{self, Member, Verdict};
use crate::config::{DuplicateFixturePolicy, ParserConfig};
use crate::diagnostics::ParseError;
use crate::model::{Field, FixtureRole, Method, MethodKind, Specification};
use crate::span::Spanned;

/// Per-class build state. Ordinals are counted here, so each class starts
/// from zero and separate builds share nothing but the grammar table.
pub struct SpecBuilder<'a> {
    config: &'a ParserConfig,
    spec: Specification,
    field_count: usize,
    feature_count: usize,
}

impl<'a> SpecBuilder<'a> {
    pub fn new(class: &ClassNode, config: &'a ParserConfig) -> Self {
        Self {
            config,
            spec: Specification::new(class.name.clone(), class.pos),
            field_count: 0,
            feature_count: 0,
        }
    }

    /// Classify every member in declaration order: fields, then constructors,
    /// then methods. The first error aborts the class.
    pub fn build(mut self, mut class: ClassNode) -> Result<Specification, ParseError> {
        let _span = tracing::debug_span!("build_spec", class = %class.name).entered();

        for field in &class.fields {
            if let Verdict::Field { shared, owner } = classify::classify(Member::Field(field), &class, self.config)? {
                self.add_field(field, shared, owner);
            } else {
                tracing::debug!(field = %field.name, "ignored field");
            }
        }

        for ctor in &class.constructors {
            classify::classify(Member::Constructor(ctor), &class, self.config)?;
        }

        let methods = std::mem::take(&mut class.methods);
        for method in methods {
            match classify::classify(Member::Method(&method), &class, self.config)? {
                Verdict::Fixture(role) => self.add_fixture(method, role)?,
                Verdict::Feature => self.add_feature(method)?,
                Verdict::Helper => self.add_helper(method),
                Verdict::Ignored | Verdict::Field { .. } => {
                    tracing::debug!(method = %method.name, "ignored method");
                }
            }
        }

        tracing::debug!(
            fields = self.spec.fields.len(),
            features = self.feature_count,
            methods = self.spec.methods.len(),
            "built specification"
        );
        Ok(self.spec)
    }

    fn add_field(&mut self, field: &FieldNode, shared: bool, owner: Option<Spanned<String>>) {
        let ordinal = self.field_count;
        self.field_count += 1;
        tracing::debug!(field = %field.name, ordinal, shared, "field");
        self.spec.fields.push(Field {
            name: field.name.clone(),
            pos: field.pos,
            ordinal,
            shared,
            owner,
        });
    }

    fn add_fixture(&mut self, method: MethodNode, role: FixtureRole) -> Result<(), ParseError> {
        tracing::debug!(method = %method.name, %role, "fixture method");
        let policy = self.config.duplicate_fixtures;
        let slot = self.spec.fixture_slot_mut(role);
        if let Some(existing) = slot.as_ref() {
            match policy {
                DuplicateFixturePolicy::Error => {
                    return Err(ParseError::duplicate_fixture(
                        format!("Duplicate '{role}()' method; a specification may declare at most one"),
                        method.pos,
                        existing.pos,
                    ));
                }
                DuplicateFixturePolicy::Overwrite => {
                    tracing::warn!(method = %method.name, first = %existing.pos, "overwriting earlier fixture method");
                }
            }
        }
        *slot = Some(Method {
            name: method.name,
            pos: method.pos,
            kind: MethodKind::Fixture { role },
            blocks: blocks::single_block(method.statements),
        });
        Ok(())
    }

    fn add_feature(&mut self, method: MethodNode) -> Result<(), ParseError> {
        let end = method.end();
        let blocks = blocks::assemble(method.statements, end)?;
        let ordinal = self.feature_count;
        self.feature_count += 1;
        tracing::debug!(method = %method.name, ordinal, blocks = blocks.len(), "feature method");
        self.spec.methods.push(Method {
            name: method.name,
            pos: method.pos,
            kind: MethodKind::Feature { ordinal },
            blocks,
        });
        Ok(())
    }

    fn add_helper(&mut self, method: MethodNode) {
        tracing::debug!(method = %method.name, "helper method");
        self.spec.methods.push(Method {
            name: method.name,
            pos: method.pos,
            kind: MethodKind::Helper,
            blocks: blocks::single_block(method.statements),
        });
    }
}

/// Build the specification model of one class.
pub fn build(class: ClassNode, config: &ParserConfig) -> Result<Specification, ParseError> {
    SpecBuilder::new(&class, config).build(class)
}

/// Build every class independently; a failing class does not stop the others.
pub fn build_all(classes: Vec<ClassNode>, config: &ParserConfig) -> Vec<(String, Result<Specification, ParseError>)> {
    classes
        .into_iter()
        .map(|class| {
            let name = class.name.clone();
            let result = build(class, config);
            if let Err(err) = &result {
                tracing::debug!(class = %name, error = %err, "class failed");
            }
            (name, result)
        })
        .collect()
}
