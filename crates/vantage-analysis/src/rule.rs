use crate::severity::{RuleCategory, RuleLanguage, Severity};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vantage_core::ParseResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: RuleCategory,
    pub severity: Severity,
    pub language: RuleLanguage,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

/// Per-rule configuration. The engine guarantees one of these exists for
/// every registered rule (defaulted to enabled, no severity override).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_override: Option<Severity>,
    #[serde(default)]
    pub options: HashMap<String, serde_json::Value>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity_override: None,
            options: HashMap::new(),
        }
    }
}

/// A single finding emitted by `Rule::check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleViolation {
    pub rule_id: String,
    pub message: String,
    pub severity: Severity,
    pub line: usize,
    pub column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
    /// Debug-only tag of the AST node kind the violation was raised against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    /// A rule's own suggested literal replacement, independent of the
    /// refactoring engine's suggestions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}

/// One attempted rule invocation's outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleExecutionResult {
    pub rule_id: String,
    pub violations: Vec<RuleViolation>,
    pub execution_time_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Immutable view handed to `Rule::check`. Rules must not mutate anything
/// reachable from it.
pub struct RuleContext<'a> {
    pub parse_result: &'a ParseResult,
    pub file_name: &'a str,
    pub source_code: &'a str,
    pub options: &'a HashMap<String, serde_json::Value>,
}

/// A named, language-scoped predicate over a parse result producing
/// violations. The rule ID (`metadata().id`) is the sole identity.
#[async_trait]
pub trait Rule: Send + Sync {
    fn metadata(&self) -> &RuleMetadata;

    async fn check(&self, ctx: &RuleContext<'_>) -> anyhow::Result<Vec<RuleViolation>>;
}

impl RuleViolation {
    pub fn new(rule_id: impl Into<String>, message: impl Into<String>, severity: Severity, line: usize, column: usize) -> Self {
        Self {
            rule_id: rule_id.into(),
            message: message.into(),
            severity,
            line,
            column,
            end_line: None,
            end_column: None,
            node: None,
            fix: None,
        }
    }

    pub fn with_end(mut self, end_line: usize, end_column: usize) -> Self {
        self.end_line = Some(end_line);
        self.end_column = Some(end_column);
        self
    }

    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }
}
