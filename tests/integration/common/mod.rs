#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use specmodel::ast::{ClassNode, Constant, Expr, FieldNode, MethodNode, PropertyNode, Statement, Stmt};
use specmodel::span::Pos;

pub fn specmodel_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_specmodel"))
}

/// Opaque code statement at `line`.
pub fn code(label: Option<&str>, text: &str, line: u32) -> Statement {
    Statement {
        label: label.map(str::to_string),
        pos: Pos::new(line, 5),
        stmt: Stmt::Expr { expr: Expr::Code { text: text.into() } },
    }
}

/// Bare string-literal statement at `line`.
pub fn desc(label: Option<&str>, text: &str, line: u32) -> Statement {
    Statement {
        label: label.map(str::to_string),
        pos: Pos::new(line, 5),
        stmt: Stmt::Expr { expr: Expr::Const { value: Constant::String(text.into()) } },
    }
}

pub fn method(name: &str, line: u32, statements: Vec<Statement>) -> MethodNode {
    let end_line = statements.last().map(|s| s.pos.line + 1).unwrap_or(line + 1);
    MethodNode {
        name: name.into(),
        pos: Pos::new(line, 3),
        end_pos: Some(Pos::new(end_line, 3)),
        is_static: false,
        is_synthetic: false,
        statements,
    }
}

pub fn static_method(name: &str, line: u32, statements: Vec<Statement>) -> MethodNode {
    MethodNode { is_static: true, ..method(name, line, statements) }
}

pub fn field(name: &str, line: u32) -> FieldNode {
    FieldNode {
        name: name.into(),
        pos: Pos::new(line, 3),
        is_static: false,
        is_synthetic: false,
        annotations: vec![],
    }
}

pub fn shared_field(name: &str, line: u32) -> FieldNode {
    FieldNode { annotations: vec!["Shared".into()], ..field(name, line) }
}

pub fn property(name: &str, line: u32) -> PropertyNode {
    PropertyNode { name: name.into(), pos: Pos::new(line, 3) }
}

pub fn class(name: &str, fields: Vec<FieldNode>, methods: Vec<MethodNode>) -> ClassNode {
    ClassNode {
        name: name.into(),
        pos: Pos::new(1, 1),
        fields,
        properties: vec![],
        constructors: vec![],
        methods,
    }
}

/// Write `contents` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
