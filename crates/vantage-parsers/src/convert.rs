use tree_sitter::Node;
use vantage_core::{AstNode, AstNodeKind, ParseError, SourceLocation};

/// Translates a concrete tree-sitter node kind into the core's tagged-union
/// AST. Anything outside the recognized set falls into `Other`, carrying the
/// raw grammar kind string — the escape hatch the AST contract calls for.
fn map_kind(node: Node) -> AstNodeKind {
    match node.kind() {
        "function_declaration" => AstNodeKind::FunctionDeclaration,
        "function" | "function_expression" | "generator_function" => {
            AstNodeKind::FunctionExpression
        }
        "arrow_function" => AstNodeKind::ArrowFunctionExpression,
        "identifier" | "property_identifier" | "shorthand_property_identifier"
        | "type_identifier" => AstNodeKind::Identifier,
        "variable_declaration" | "lexical_declaration" => AstNodeKind::VariableDeclaration,
        "variable_declarator" => AstNodeKind::VariableDeclarator,
        "call_expression" => AstNodeKind::CallExpression,
        "member_expression" => AstNodeKind::MemberExpression,
        "for_statement" => AstNodeKind::ForStatement,
        "while_statement" => AstNodeKind::WhileStatement,
        "do_statement" => AstNodeKind::DoWhileStatement,
        "for_in_statement" => {
            if has_child_of_kind(node, "of") {
                AstNodeKind::ForOfStatement
            } else {
                AstNodeKind::ForInStatement
            }
        }
        "if_statement" => AstNodeKind::IfStatement,
        other => AstNodeKind::Other(other.to_string()),
    }
}

/// `for_in_statement` covers both `for...in` and `for...of` in the grammar;
/// the distinguishing token is an unnamed `of`/`in` child, not a field.
fn has_child_of_kind(node: Node, kind: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|child| child.kind() == kind)
}

fn node_location(node: Node) -> SourceLocation {
    let start = node.start_position();
    let end = node.end_position();
    SourceLocation::range(start.row + 1, start.column, end.row + 1, end.column)
}

fn node_text(node: Node, source: &[u8]) -> Option<String> {
    node.utf8_text(source).ok().map(|s| s.to_string())
}

/// Recursively converts a tree-sitter parse tree into the generic AST,
/// keeping only named children (punctuation/keyword tokens are dropped,
/// except where `map_kind` inspects them directly, e.g. `of` vs `in`).
pub fn convert(node: Node, source: &[u8]) -> AstNode {
    let kind = map_kind(node);
    let mut cursor = node.walk();
    let children: Vec<AstNode> = node
        .named_children(&mut cursor)
        .map(|child| convert(child, source))
        .collect();

    let mut ast = AstNode::new(kind)
        .with_loc(node_location(node))
        .with_byte_range((node.start_byte(), node.end_byte()));

    // Only leaves carry `text`: an interior node's source slice is already
    // reconstructible from its children, and storing it anyway would mean
    // every ancestor holds a copy of its entire subtree's text.
    if children.is_empty() {
        if let Some(text) = node_text(node, source) {
            ast = ast.with_text(text);
        }
    }

    ast.with_children(children)
}

/// Walks the tree collecting tree-sitter's own error/missing-node markers.
/// tree-sitter performs error recovery, so a tree is still produced even
/// when this list is non-empty — the coordinator is responsible for
/// refusing to run rules in that case, not this adapter.
pub fn collect_errors(node: Node, source: &[u8], out: &mut Vec<ParseError>) {
    if node.is_error() || node.is_missing() {
        let pos = node.start_position();
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            node_text(node, source)
                .map(|text| format!("unexpected token: {text}"))
                .unwrap_or_else(|| "syntax error".to_string())
        };
        out.push(ParseError {
            message,
            line: pos.row + 1,
            column: pos.column,
            index: Some(node.start_byte()),
        });
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(child, source, out);
    }
}
