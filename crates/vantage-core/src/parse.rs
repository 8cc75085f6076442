use crate::ast::AstNode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The surface languages the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Js,
    Ts,
}

impl Language {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "ts" | "tsx" => Some(Language::Ts),
            "js" | "jsx" => Some(Language::Js),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Js => write!(f, "js"),
            Language::Ts => write!(f, "ts"),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "js" => Ok(Language::Js),
            "ts" => Ok(Language::Ts),
            _ => Err(()),
        }
    }
}

/// A parse error surfaced by a parser adapter. Never propagated as an
/// exceptional control-flow path — always collected into `ParseResult::errors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

/// The immutable output of parsing one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    pub ast: AstNode,
    pub source_code: String,
    pub file_name: String,
    pub language: Language,
    pub parse_time_ms: f64,
    pub errors: Vec<ParseError>,
}

/// Implemented once per surface language by `vantage-parsers`. Kept in
/// `vantage-core` so the analysis coordinator can depend on the contract
/// without the analysis crate depending on any concrete parser backend.
pub trait LanguageParser: Send + Sync {
    fn language(&self) -> Language;
    fn parse(&self, source: &str, file_name: &str) -> ParseResult;
}

impl ParseResult {
    /// Per the invariant in the data model: a non-empty error list means the
    /// AST may be partial and the rule engine must not run against it.
    pub fn is_usable(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn line_count(&self) -> usize {
        if self.source_code.is_empty() {
            1
        } else {
            self.source_code.lines().count().max(1)
        }
    }
}
