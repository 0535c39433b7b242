use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::diagnostics::ParseError;

pub const CONFIG_FILE_NAME: &str = "specmodel.toml";

/// What to do when a class declares the same fixture method twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateFixturePolicy {
    #[default]
    Error,
    /// Last declaration wins.
    Overwrite,
}

/// Knobs for a single specification build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Fields whose names start with this prefix are internal and skipped.
    pub internal_prefix: String,
    /// Annotation marking a field that persists across iterations.
    pub shared_annotation: String,
    pub duplicate_fixtures: DuplicateFixturePolicy,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            internal_prefix: "$".to_string(),
            shared_annotation: "Shared".to_string(),
            duplicate_fixtures: DuplicateFixturePolicy::Error,
        }
    }
}

impl ParserConfig {
    /// True when `annotation` names the shared marker, either by simple name
    /// or qualified (`spock.lang.Shared`).
    pub fn is_shared_annotation(&self, annotation: &str) -> bool {
        let simple = annotation.rsplit('.').next().unwrap_or(annotation);
        let simple = simple.strip_prefix('@').unwrap_or(simple);
        simple == self.shared_annotation
    }
}

// ---- TOML deserialization types ----

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    parser: ParserConfig,
}

/// Parse config text. `path` is only used for error reporting.
pub fn parse_config(text: &str, path: &Path) -> Result<ParserConfig, ParseError> {
    let parsed: TomlConfig = toml::from_str(text)
        .map_err(|e| ParseError::config(format!("{}: {e}", CONFIG_FILE_NAME), path.to_path_buf()))?;
    if parsed.parser.shared_annotation.is_empty() {
        return Err(ParseError::config(
            "parser.shared_annotation must not be empty",
            path.to_path_buf(),
        ));
    }
    Ok(parsed.parser)
}

pub fn load_config(path: &Path) -> Result<ParserConfig, ParseError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ParseError::config(format!("cannot read config: {e}"), path.to_path_buf()))?;
    parse_config(&text, path)
}

// ---- Config discovery ----

/// Walk from start_dir up to .git or FS root, looking for specmodel.toml.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = start_dir.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        // Stop at .git (file or dir, so worktrees and submodules count)
        if dir.join(".git").exists() {
            return None;
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Load the nearest config above `start_dir`, or defaults if there is none.
pub fn discover(start_dir: &Path) -> Result<ParserConfig, ParseError> {
    match find_config(start_dir) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using config");
            load_config(&path)
        }
        None => Ok(ParserConfig::default()),
    }
}
