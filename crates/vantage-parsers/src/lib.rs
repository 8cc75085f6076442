//! Concrete `tree-sitter`-backed parser adapters for the JS and TS dialects,
//! translating each grammar's concrete syntax into the parser-agnostic AST
//! contract owned by `vantage-core`.

mod convert;
pub mod js;
pub mod ts;

pub use js::JsParser;
pub use ts::{find_any_type_annotations, TsParser};
