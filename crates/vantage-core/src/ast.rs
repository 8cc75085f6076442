use crate::location::SourceLocation;
use serde::{Deserialize, Serialize};

/// The node tags the core recognizes, plus an open escape hatch for
/// whatever a concrete grammar produces that isn't in this list. Rule
/// authors pattern-match on this; parser adapters are the only code that
/// knows about concrete tree-sitter node kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AstNodeKind {
    FunctionDeclaration,
    FunctionExpression,
    ArrowFunctionExpression,
    Identifier,
    VariableDeclaration,
    VariableDeclarator,
    CallExpression,
    MemberExpression,
    ForStatement,
    WhileStatement,
    DoWhileStatement,
    ForInStatement,
    ForOfStatement,
    IfStatement,
    /// Anything outside the recognized set, carrying the raw grammar kind.
    Other(String),
}

impl AstNodeKind {
    pub fn is_loop(&self) -> bool {
        matches!(
            self,
            AstNodeKind::ForStatement
                | AstNodeKind::WhileStatement
                | AstNodeKind::DoWhileStatement
                | AstNodeKind::ForInStatement
                | AstNodeKind::ForOfStatement
        )
    }

    pub fn is_function(&self) -> bool {
        matches!(
            self,
            AstNodeKind::FunctionDeclaration
                | AstNodeKind::FunctionExpression
                | AstNodeKind::ArrowFunctionExpression
        )
    }
}

/// A node in the parser-agnostic AST. `text` carries a leaf node's own
/// source slice (used by rules that need the literal spelling, e.g. an
/// identifier name or a member-expression property) — it is `None` on any
/// node with children, so a parser adapter must never store a subtree's
/// text there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AstNode {
    pub kind: AstNodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub byte_range: Option<(usize, usize)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub children: Vec<AstNode>,
}

impl AstNode {
    pub fn new(kind: AstNodeKind) -> Self {
        Self {
            kind,
            loc: None,
            byte_range: None,
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_loc(mut self, loc: SourceLocation) -> Self {
        self.loc = Some(loc);
        self
    }

    pub fn with_byte_range(mut self, range: (usize, usize)) -> Self {
        self.byte_range = Some(range);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_children(mut self, children: Vec<AstNode>) -> Self {
        self.children = children;
        self
    }

    /// Depth-first, pre-order traversal. `visit` returns `true` to descend
    /// into the node's children and `false` to prune the subtree.
    pub fn walk<F: FnMut(&AstNode) -> bool>(&self, visit: &mut F) {
        if visit(self) {
            for child in &self.children {
                child.walk(visit);
            }
        }
    }

    /// All nodes (including self) whose kind equals `kind`, in document order.
    pub fn find_all(&self, kind: &AstNodeKind) -> Vec<&AstNode> {
        let mut out = Vec::new();
        self.walk(&mut |node| {
            if &node.kind == kind {
                out.push(node);
            }
            true
        });
        out
    }

    /// Call expressions whose callee resolves to `name`, matched either by
    /// the bare identifier callee or by a member expression's property name.
    pub fn find_calls_by_callee_name(&self, name: &str) -> Vec<&AstNode> {
        let mut out = Vec::new();
        self.walk(&mut |node| {
            if node.kind == AstNodeKind::CallExpression {
                if let Some(callee) = node.children.first() {
                    let matches = match &callee.kind {
                        AstNodeKind::Identifier => callee.text.as_deref() == Some(name),
                        AstNodeKind::MemberExpression => callee
                            .children
                            .last()
                            .map(|property| property.text.as_deref() == Some(name))
                            .unwrap_or(false),
                        _ => false,
                    };
                    if matches {
                        out.push(node);
                    }
                }
            }
            true
        });
        out
    }

    /// All loop nodes (for/while/do-while/for-in/for-of), in document order.
    pub fn find_loops(&self) -> Vec<&AstNode> {
        let mut out = Vec::new();
        self.walk(&mut |node| {
            if node.kind.is_loop() {
                out.push(node);
            }
            true
        });
        out
    }

    /// All function-like nodes (declaration/expression/arrow), document order.
    pub fn find_functions(&self) -> Vec<&AstNode> {
        let mut out = Vec::new();
        self.walk(&mut |node| {
            if node.kind.is_function() {
                out.push(node);
            }
            true
        });
        out
    }
}
