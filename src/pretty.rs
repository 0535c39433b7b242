use crate::ast::{Constant, Expr, Statement, Stmt};
use crate::grammar::BlockKind;
use crate::model::*;

/// Pretty-print a `Specification` as an indented outline.
pub fn pretty_print(spec: &Specification) -> String {
    let mut pp = PrettyPrinter::new();
    pp.emit_spec(spec);
    pp.buf
}

struct PrettyPrinter {
    buf: String,
    indent: usize,
}

impl PrettyPrinter {
    fn new() -> Self {
        Self {
            buf: String::new(),
            indent: 0,
        }
    }

    fn write(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn newline(&mut self) {
        self.buf.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.buf.push_str("    ");
        }
    }

    fn line(&mut self, s: &str) {
        self.write_indent();
        self.write(s);
        self.newline();
    }

    fn indent(&mut self) {
        self.indent += 1;
    }

    fn dedent(&mut self) {
        self.indent -= 1;
    }

    // ── Specification ────────────────────────────────────────────────

    fn emit_spec(&mut self, spec: &Specification) {
        self.line(&format!("spec {}", spec.name));
        self.indent();

        for field in &spec.fields {
            self.emit_field(field);
        }

        for role in FixtureRole::ALL {
            if let Some(method) = spec.fixture(role) {
                self.emit_method(method);
            }
        }

        for method in &spec.methods {
            self.emit_method(method);
        }

        self.dedent();
    }

    fn emit_field(&mut self, field: &Field) {
        let mut s = format!("field #{} {}", field.ordinal, field.name);
        if field.shared {
            s.push_str(" [shared]");
        }
        if field.owner.is_some() {
            s.push_str(" [property]");
        }
        self.line(&s);
    }

    fn emit_method(&mut self, method: &Method) {
        let header = match method.kind {
            MethodKind::Fixture { role } => format!("fixture {role}()"),
            MethodKind::Feature { ordinal } => format!("feature #{ordinal} \"{}\"", method.name),
            MethodKind::Helper => format!("helper {}()", method.name),
        };
        self.line(&header);
        self.indent();
        for block in &method.blocks {
            // An empty leading block carries no information
            if block.kind == BlockKind::Anonymous && block.is_empty() && method.blocks.len() > 1 {
                continue;
            }
            self.emit_block(block);
        }
        self.dedent();
    }

    fn emit_block(&mut self, block: &Block) {
        let mut header = format!("{}:", block.kind);
        for desc in &block.descriptions {
            header.push_str(&format!(" \"{desc}\""));
        }
        self.line(&header);
        self.indent();
        for stmt in &block.statements {
            let text = stmt_text(stmt);
            self.line(&text);
        }
        self.dedent();
    }
}

/// Source-like rendering of an opaque statement.
pub fn stmt_text(stmt: &Statement) -> String {
    match &stmt.stmt {
        Stmt::Other { text } => text.clone(),
        Stmt::Expr { expr: Expr::Code { text } } => text.clone(),
        Stmt::Expr { expr: Expr::Const { value } } => match value {
            Constant::String(s) => format!("{s:?}"),
            Constant::Int(n) => n.to_string(),
            Constant::Float(f) => f.to_string(),
            Constant::Bool(b) => b.to_string(),
            Constant::Null => "null".to_string(),
        },
    }
}
