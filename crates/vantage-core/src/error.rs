use crate::parse::ParseError;
use thiserror::Error;

/// Errors that can surface from the parse → analyze path that the library
/// crates own. HTTP-specific variants (`NotFound`, `BadRequest`) live in
/// `vantage-server`'s own error type, which wraps this one.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("parse error")]
    ParseFailure { errors: Vec<ParseError> },

    #[error("internal error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
