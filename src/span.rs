use std::fmt;

use serde::{Deserialize, Serialize};

/// 1-based line/column position reported by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
}

impl Pos {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Position used when the front-end did not record one.
    pub fn dummy() -> Self {
        Self { line: 0, column: 0 }
    }

    pub fn is_dummy(&self) -> bool {
        self.line == 0
    }
}

impl Default for Pos {
    fn default() -> Self {
        Self::dummy()
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A value annotated with its source position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spanned<T> {
    pub node: T,
    pub pos: Pos,
}

impl<T> Spanned<T> {
    pub fn new(node: T, pos: Pos) -> Self {
        Self { node, pos }
    }
}
