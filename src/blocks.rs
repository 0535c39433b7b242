//! Splits a method body into blocks following the label grammar.

use crate::ast::Statement;
use crate::diagnostics::ParseError;
use crate::grammar::{self, BlockKind, GrammarDescriptor, Successor};
use crate::model::Block;
use crate::span::Pos;

/// Assemble the blocks of a feature method.
///
/// Statements before the first label land in a leading anonymous block.
/// Each label starts a new block, provided the grammar allows it after the
/// current one, and the body must end in a block that may end a method
/// (checked against `end_pos`). Statements that are nothing but a string
/// literal become descriptions of the block they appear in.
pub fn assemble(statements: Vec<Statement>, end_pos: Pos) -> Result<Vec<Block>, ParseError> {
    let mut blocks = Vec::new();
    let mut current = Block::anonymous();
    let mut descriptor = BlockKind::Anonymous.descriptor();

    for stmt in statements {
        if let Some(label) = stmt.label.as_deref() {
            let Some(kind) = grammar::lookup_label(label) else {
                return Err(ParseError::label(format!("Unrecognized block label: {label}"), stmt.pos));
            };
            check_successor(descriptor, Successor::Block(kind), stmt.pos)?;
            tracing::trace!(block = %kind, pos = %stmt.pos, "block start");
            blocks.push(std::mem::replace(&mut current, Block::new(kind)));
            descriptor = kind.descriptor();
        }
        push_statement(&mut current, stmt);
    }

    check_successor(descriptor, Successor::End, end_pos)?;
    blocks.push(current);
    Ok(blocks)
}

/// A fixture or helper body: one anonymous block holding every statement
/// verbatim, string literals included.
pub fn single_block(statements: Vec<Statement>) -> Vec<Block> {
    let mut block = Block::anonymous();
    block.statements = statements;
    vec![block]
}

fn push_statement(block: &mut Block, stmt: Statement) {
    match stmt.string_literal() {
        Some(text) => block.descriptions.push(text.to_string()),
        None => block.statements.push(stmt),
    }
}

fn check_successor(current: &GrammarDescriptor, next: Successor, pos: Pos) -> Result<(), ParseError> {
    if current.allows(next) {
        return Ok(());
    }
    Err(ParseError::label(
        format!(
            "'{}' is not allowed here; instead, use one of: {}",
            next.token(),
            current.successor_list()
        ),
        pos,
    ))
}
