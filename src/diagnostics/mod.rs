pub mod line_index;

use std::path::PathBuf;

use thiserror::Error;

use crate::span::Pos;
use line_index::LineIndex;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{msg}")]
    Structural { msg: String, pos: Pos },

    #[error("{msg}")]
    Naming { msg: String, pos: Pos },

    #[error("{msg}")]
    Modifier { msg: String, pos: Pos },

    #[error("{msg}")]
    Label { msg: String, pos: Pos },

    #[error("{msg}")]
    DuplicateFixture { msg: String, pos: Pos, first: Pos },

    #[error("Input error: {msg}")]
    Input { msg: String, path: PathBuf },

    #[error("Config error: {msg}")]
    Config { msg: String, path: PathBuf },
}

impl ParseError {
    pub fn structural(msg: impl Into<String>, pos: Pos) -> Self {
        Self::Structural { msg: msg.into(), pos }
    }

    pub fn naming(msg: impl Into<String>, pos: Pos) -> Self {
        Self::Naming { msg: msg.into(), pos }
    }

    pub fn modifier(msg: impl Into<String>, pos: Pos) -> Self {
        Self::Modifier { msg: msg.into(), pos }
    }

    pub fn label(msg: impl Into<String>, pos: Pos) -> Self {
        Self::Label { msg: msg.into(), pos }
    }

    pub fn duplicate_fixture(msg: impl Into<String>, pos: Pos, first: Pos) -> Self {
        Self::DuplicateFixture { msg: msg.into(), pos, first }
    }

    pub fn input(msg: impl Into<String>, path: PathBuf) -> Self {
        Self::Input { msg: msg.into(), path }
    }

    pub fn config(msg: impl Into<String>, path: PathBuf) -> Self {
        Self::Config { msg: msg.into(), path }
    }

    /// Short tag shown in rendered diagnostics.
    pub fn kind_str(&self) -> &'static str {
        match self {
            ParseError::Structural { .. } => "structure",
            ParseError::Naming { .. } => "naming",
            ParseError::Modifier { .. } => "modifier",
            ParseError::Label { .. } => "label",
            ParseError::DuplicateFixture { .. } => "duplicate-fixture",
            ParseError::Input { .. } => "input",
            ParseError::Config { .. } => "config",
        }
    }

    /// Source position, for errors raised while building a class.
    pub fn pos(&self) -> Option<Pos> {
        match self {
            ParseError::Structural { pos, .. }
            | ParseError::Naming { pos, .. }
            | ParseError::Modifier { pos, .. }
            | ParseError::Label { pos, .. }
            | ParseError::DuplicateFixture { pos, .. } => Some(*pos),
            ParseError::Input { .. } | ParseError::Config { .. } => None,
        }
    }
}

/// Render a ParseError as plain `file:line:col: error[kind]: message` text.
pub fn format_error(filename: &str, err: &ParseError) -> String {
    match err {
        ParseError::Input { msg, path } | ParseError::Config { msg, path } => {
            format!("error[{}]: {msg}\n  --> {}", err.kind_str(), path.display())
        }
        _ => {
            let pos = err.pos().unwrap_or_default();
            format!("{filename}:{pos}: error[{}]: {err}", err.kind_str())
        }
    }
}

/// Render a ParseError against its source text with ariadne.
/// Falls back to `format_error` when the error has no position, or one that
/// does not exist in `source`.
pub fn render_error(source: &str, filename: &str, err: &ParseError, color: bool) -> String {
    use ariadne::{Config, Label, Report, ReportKind, Source};

    let index = LineIndex::new(source);
    let Some(pos) = err.pos().filter(|pos| is_placeable(source, &index, *pos)) else {
        return format_error(filename, err);
    };

    // ariadne spans count chars, not bytes
    let span_at = |pos: Pos| {
        let start = index.offset_of(source, pos);
        let end = index.word_end(source, start);
        let char_start = source[..start].chars().count();
        char_start..char_start + source[start..end].chars().count()
    };
    let span = span_at(pos);

    let mut report = Report::build(ReportKind::Error, filename, span.start)
        .with_config(Config::default().with_color(color))
        .with_message(format!("{} error", err.kind_str()))
        .with_label(Label::new((filename, span)).with_message(err.to_string()));

    if let ParseError::DuplicateFixture { first, .. } = err {
        if is_placeable(source, &index, *first) {
            report = report.with_label(
                Label::new((filename, span_at(*first))).with_message("first declared here"),
            );
        }
    }

    let mut buf = Vec::new();
    match report.finish().write((filename, Source::from(source)), &mut buf) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => format_error(filename, err),
    }
}

/// A position ariadne can point at: a line of `source` that starts before EOF.
fn is_placeable(source: &str, index: &LineIndex, pos: Pos) -> bool {
    if pos.is_dummy() || pos.line as usize > index.line_count() {
        return false;
    }
    index.offset_of(source, Pos::new(pos.line, 1)) < source.len()
}
