//! Foundational, parser-agnostic types shared by every other Vantage crate:
//! source locations, the AST contract, parse results, the core error
//! taxonomy, and the ambient logging/config stack.

pub mod ast;
pub mod config;
pub mod error;
pub mod location;
pub mod logging;
pub mod parse;

pub use ast::{AstNode, AstNodeKind};
pub use config::EngineSettings;
pub use error::{CoreError, CoreResult};
pub use location::SourceLocation;
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use parse::{Language, LanguageParser, ParseError, ParseResult};
