//! Syntax tree handed over by the host-language front-end.
//!
//! Only the shape the builder needs is modelled: declarations with their
//! modifiers, and top-level statements with labels and positions. Statement
//! contents beyond string-literal detection are opaque.

use serde::{Deserialize, Serialize};

use crate::span::Pos;

/// One input file: any number of classes, optionally with the path of the
/// source they were parsed from (used for rendering diagnostics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    #[serde(default)]
    pub source_path: Option<String>,
    pub classes: Vec<ClassNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassNode {
    pub name: String,
    #[serde(default)]
    pub pos: Pos,
    #[serde(default)]
    pub fields: Vec<FieldNode>,
    #[serde(default)]
    pub properties: Vec<PropertyNode>,
    #[serde(default)]
    pub constructors: Vec<MethodNode>,
    #[serde(default)]
    pub methods: Vec<MethodNode>,
}

impl ClassNode {
    pub fn property(&self, name: &str) -> Option<&PropertyNode> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldNode {
    pub name: String,
    #[serde(default)]
    pub pos: Pos,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_synthetic: bool,
    #[serde(default)]
    pub annotations: Vec<String>,
}

/// A declared property; its backing field is a genuine data member even when
/// the front-end marks that field synthetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyNode {
    pub name: String,
    #[serde(default)]
    pub pos: Pos,
}

/// A method or constructor declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodNode {
    pub name: String,
    #[serde(default)]
    pub pos: Pos,
    /// Position of the closing brace; falls back to `pos` when absent.
    #[serde(default)]
    pub end_pos: Option<Pos>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_synthetic: bool,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

impl MethodNode {
    pub fn end(&self) -> Pos {
        self.end_pos.unwrap_or(self.pos)
    }

    pub fn has_labels(&self) -> bool {
        self.statements.iter().any(|s| s.label.is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub pos: Pos,
    pub stmt: Stmt,
}

impl Statement {
    /// The literal value when the statement is nothing but a string literal.
    pub fn string_literal(&self) -> Option<&str> {
        match &self.stmt {
            Stmt::Expr { expr: Expr::Const { value: Constant::String(s) } } => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stmt {
    Expr { expr: Expr },
    /// Any non-expression statement, kept as source text.
    Other { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    Const { value: Constant },
    Code { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constant {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}
