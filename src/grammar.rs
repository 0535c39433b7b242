//! Block label grammar.
//!
//! A feature method body is a walk through this table: it starts in the
//! anonymous block, each label moves to the block kind it names, and the walk
//! must be allowed to stop (`Successor::End`) when the body runs out.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a block inside a method body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Statements before the first label.
    Anonymous,
    Setup,
    /// `when:`, the stimulus.
    Stimulus,
    /// `then:`, the response to the preceding stimulus.
    Outcome,
    /// `expect:`, stimulus and response in one.
    SingleOutcome,
    Cleanup,
    /// `where:`, data-driven parameterization.
    DataTable,
}

/// Something that may follow a block: another block or the end of the method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Successor {
    Block(BlockKind),
    End,
}

/// Static grammar record for one block kind.
#[derive(Debug)]
pub struct GrammarDescriptor {
    pub kind: BlockKind,
    /// Label introducing the block; `None` for the anonymous block.
    pub label: Option<&'static str>,
    pub successors: &'static [Successor],
}

impl GrammarDescriptor {
    pub fn allows(&self, next: Successor) -> bool {
        self.successors.contains(&next)
    }

    /// Successors rendered as label tokens, e.g. `[then]`.
    pub fn successor_list(&self) -> String {
        let names: Vec<&str> = self.successors.iter().map(|s| s.token()).collect();
        format!("[{}]", names.join(", "))
    }
}

use BlockKind::*;
use Successor::{Block as B, End};

static GRAMMAR: [GrammarDescriptor; 7] = [
    GrammarDescriptor {
        kind: Anonymous,
        label: None,
        successors: &[B(Setup), B(Stimulus), B(Outcome), B(SingleOutcome), B(Cleanup), B(DataTable), End],
    },
    GrammarDescriptor {
        kind: Setup,
        label: Some("setup"),
        successors: &[B(Stimulus), B(Outcome), B(SingleOutcome), B(Cleanup), B(DataTable), End],
    },
    GrammarDescriptor {
        kind: Stimulus,
        label: Some("when"),
        successors: &[B(Outcome)],
    },
    GrammarDescriptor {
        kind: Outcome,
        label: Some("then"),
        successors: &[B(Stimulus), B(Outcome), B(Cleanup), B(DataTable), End],
    },
    GrammarDescriptor {
        kind: SingleOutcome,
        label: Some("expect"),
        successors: &[B(Cleanup), B(DataTable), End],
    },
    GrammarDescriptor {
        kind: Cleanup,
        label: Some("cleanup"),
        successors: &[B(DataTable), End],
    },
    GrammarDescriptor {
        kind: DataTable,
        label: Some("where"),
        successors: &[End],
    },
];

/// Label token used for the end-of-method pseudo kind in diagnostics.
pub const METHOD_END_TOKEN: &str = "end-of-method";

impl BlockKind {
    pub const ALL: [BlockKind; 7] =
        [Anonymous, Setup, Stimulus, Outcome, SingleOutcome, Cleanup, DataTable];

    pub fn descriptor(self) -> &'static GrammarDescriptor {
        let idx = match self {
            Anonymous => 0,
            Setup => 1,
            Stimulus => 2,
            Outcome => 3,
            SingleOutcome => 4,
            Cleanup => 5,
            DataTable => 6,
        };
        &GRAMMAR[idx]
    }

    /// Name used in diagnostics and pretty output.
    pub fn token(self) -> &'static str {
        self.descriptor().label.unwrap_or("anonymous")
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl Successor {
    pub fn token(self) -> &'static str {
        match self {
            B(kind) => kind.token(),
            End => METHOD_END_TOKEN,
        }
    }
}

/// Resolve a statement label to the block kind it introduces.
/// Matching is exact and case-sensitive; the anonymous block has no label.
pub fn lookup_label(label: &str) -> Option<BlockKind> {
    GRAMMAR
        .iter()
        .find(|d| d.label == Some(label))
        .map(|d| d.kind)
}

/// All descriptors in table order.
pub fn descriptors() -> &'static [GrammarDescriptor] {
    &GRAMMAR
}
