use crate::convert::{collect_errors, convert};
use std::time::Instant;
use vantage_core::{AstNode, AstNodeKind, Language, LanguageParser, ParseError, ParseResult};

/// The JS dialect parser adapter, backed by `tree-sitter-javascript`.
pub struct JsParser;

impl Default for JsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl JsParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for JsParser {
    fn language(&self) -> Language {
        Language::Js
    }

    fn parse(&self, source: &str, file_name: &str) -> ParseResult {
        let start = Instant::now();
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(tree_sitter_javascript::language())
            .expect("tree-sitter-javascript grammar failed to load");

        let tree = parser.parse(source, None);
        let parse_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        let Some(tree) = tree else {
            return ParseResult {
                ast: AstNode::new(AstNodeKind::Other("program".to_string())),
                source_code: source.to_string(),
                file_name: file_name.to_string(),
                language: Language::Js,
                parse_time_ms,
                errors: vec![ParseError {
                    message: "parser produced no tree".to_string(),
                    line: 1,
                    column: 0,
                    index: None,
                }],
            };
        };

        let root = tree.root_node();
        let bytes = source.as_bytes();
        let mut errors = Vec::new();
        collect_errors(root, bytes, &mut errors);
        let ast = convert(root, bytes);

        ParseResult {
            ast,
            source_code: source.to_string(),
            file_name: file_name.to_string(),
            language: Language::Js,
            parse_time_ms,
            errors,
        }
    }
}
