//! Object model of a parsed specification class.

use std::fmt;

use serde::Serialize;

use crate::ast::Statement;
use crate::grammar::BlockKind;
use crate::span::{Pos, Spanned};

/// Parsed model of one specification class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Specification {
    pub name: String,
    pub pos: Pos,
    pub fields: Vec<Field>,
    /// Feature and helper methods, in declaration order.
    pub methods: Vec<Method>,
    pub setup: Option<Method>,
    pub cleanup: Option<Method>,
    pub setup_spec: Option<Method>,
    pub cleanup_spec: Option<Method>,
}

impl Specification {
    pub fn new(name: impl Into<String>, pos: Pos) -> Self {
        Self {
            name: name.into(),
            pos,
            fields: Vec::new(),
            methods: Vec::new(),
            setup: None,
            cleanup: None,
            setup_spec: None,
            cleanup_spec: None,
        }
    }

    pub fn features(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter().filter(|m| m.is_feature())
    }

    pub fn helpers(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter().filter(|m| matches!(m.kind, MethodKind::Helper))
    }

    pub fn fixture(&self, role: FixtureRole) -> Option<&Method> {
        self.fixture_slot(role).as_ref()
    }

    pub fn fixture_slot(&self, role: FixtureRole) -> &Option<Method> {
        match role {
            FixtureRole::Setup => &self.setup,
            FixtureRole::Cleanup => &self.cleanup,
            FixtureRole::SetupSpec => &self.setup_spec,
            FixtureRole::CleanupSpec => &self.cleanup_spec,
        }
    }

    pub fn fixture_slot_mut(&mut self, role: FixtureRole) -> &mut Option<Method> {
        match role {
            FixtureRole::Setup => &mut self.setup,
            FixtureRole::Cleanup => &mut self.cleanup,
            FixtureRole::SetupSpec => &mut self.setup_spec,
            FixtureRole::CleanupSpec => &mut self.cleanup_spec,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn shared_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.shared)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub pos: Pos,
    pub ordinal: usize,
    /// Keeps its value across iterations of a data-driven feature.
    pub shared: bool,
    /// Property the field backs, if it was declared as one.
    pub owner: Option<Spanned<String>>,
}

/// Lifecycle hook a fixture method fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureRole {
    Setup,
    Cleanup,
    SetupSpec,
    CleanupSpec,
}

impl FixtureRole {
    pub const ALL: [FixtureRole; 4] =
        [FixtureRole::Setup, FixtureRole::Cleanup, FixtureRole::SetupSpec, FixtureRole::CleanupSpec];

    /// Method name that declares this fixture.
    pub fn method_name(self) -> &'static str {
        match self {
            FixtureRole::Setup => "setup",
            FixtureRole::Cleanup => "cleanup",
            FixtureRole::SetupSpec => "setupSpec",
            FixtureRole::CleanupSpec => "cleanupSpec",
        }
    }
}

impl fmt::Display for FixtureRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MethodKind {
    Fixture { role: FixtureRole },
    Feature { ordinal: usize },
    Helper,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Method {
    pub name: String,
    pub pos: Pos,
    pub kind: MethodKind,
    pub blocks: Vec<Block>,
}

impl Method {
    pub fn is_feature(&self) -> bool {
        matches!(self.kind, MethodKind::Feature { .. })
    }

    /// Ordinal among feature methods; `None` for fixtures and helpers.
    pub fn ordinal(&self) -> Option<usize> {
        match self.kind {
            MethodKind::Feature { ordinal } => Some(ordinal),
            _ => None,
        }
    }

    pub fn block_kinds(&self) -> Vec<BlockKind> {
        self.blocks.iter().map(|b| b.kind).collect()
    }
}

/// One phase of a method body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub descriptions: Vec<String>,
    pub statements: Vec<Statement>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self { kind, descriptions: Vec::new(), statements: Vec::new() }
    }

    pub fn anonymous() -> Self {
        Self::new(BlockKind::Anonymous)
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty() && self.statements.is_empty()
    }
}
