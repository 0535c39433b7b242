pub mod span;
pub mod diagnostics;
pub mod ast;
pub mod grammar;
pub mod model;
pub mod classify;
pub mod blocks;
pub mod builder;
pub mod config;
pub mod pretty;

use std::path::Path;

use ast::{ClassNode, CompilationUnit};
use diagnostics::ParseError;

pub use builder::{build, build_all, SpecBuilder};
pub use config::ParserConfig;
pub use model::Specification;

/// Parse front-end JSON: either a compilation unit (`{"classes": [...]}`) or a
/// single bare class. `path` is only used for error reporting.
pub fn parse_unit(text: &str, path: &Path) -> Result<CompilationUnit, ParseError> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| ParseError::input(format!("invalid JSON: {e}"), path.to_path_buf()))?;

    if value.get("classes").is_some() {
        serde_json::from_value(value)
            .map_err(|e| ParseError::input(format!("invalid compilation unit: {e}"), path.to_path_buf()))
    } else {
        let class: ClassNode = serde_json::from_value(value)
            .map_err(|e| ParseError::input(format!("invalid class: {e}"), path.to_path_buf()))?;
        Ok(CompilationUnit { source_path: None, classes: vec![class] })
    }
}

/// Read and parse a front-end JSON file.
pub fn load_unit(path: &Path) -> Result<CompilationUnit, ParseError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ParseError::input(format!("cannot read file: {e}"), path.to_path_buf()))?;
    parse_unit(&text, path)
}

/// Build every class of a JSON unit, stopping at the first failing class.
/// Used by tests and callers that only want the happy path.
pub fn build_json(text: &str, config: &ParserConfig) -> Result<Vec<Specification>, ParseError> {
    let unit = parse_unit(text, Path::new("<input>"))?;
    unit.classes.into_iter().map(|class| build(class, config)).collect()
}
