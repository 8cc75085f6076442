use crate::rule::RuleViolation;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vantage_core::ParseResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// high >= 80, medium 50-79, low < 50.
    pub fn for_score(score: u8) -> Self {
        if score >= 80 {
            Confidence::High
        } else if score >= 50 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    pub fn is_consistent_with(&self, score: u8) -> bool {
        *self == Self::for_score(score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformationKind {
    Replace,
    Insert,
    Delete,
}

/// A single line/column-addressed text edit. `start_column`/`end_column`
/// are 0-based, half-open (`end_column` is exclusive), matching how the
/// transformation executor slices each line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeTransformation {
    #[serde(rename = "type")]
    pub kind: TransformationKind,
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
    /// Documentation only — the executor never reads this field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_code: Option<String>,
    pub new_code: String,
    pub description: String,
}

impl CodeTransformation {
    pub fn replace(
        start_line: usize,
        start_column: usize,
        end_line: usize,
        end_column: usize,
        new_code: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind: TransformationKind::Replace,
            start_line,
            start_column,
            end_line,
            end_column,
            original_code: None,
            new_code: new_code.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Impact {
    pub estimated_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefactoringSuggestion {
    pub id: String,
    pub rule_id: String,
    pub title: String,
    pub description: String,
    pub transformations: Vec<CodeTransformation>,
    pub confidence: Confidence,
    pub confidence_score: u8,
    pub reasoning: String,
    pub impact: Impact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

/// Immutable view handed to `RefactoringProvider::generate_suggestions`.
pub struct RefactoringContext<'a> {
    pub parse_result: &'a ParseResult,
    pub violation: &'a RuleViolation,
    pub file_name: &'a str,
    pub source_code: &'a str,
}

/// A handler keyed to a rule id that turns violations of that rule into
/// suggestions. At most one provider per rule id in a registry.
#[async_trait]
pub trait RefactoringProvider: Send + Sync {
    fn rule_id(&self) -> &str;

    fn can_refactor(&self, violation: &RuleViolation) -> bool {
        violation.rule_id == self.rule_id()
    }

    async fn generate_suggestions(
        &self,
        ctx: &RefactoringContext<'_>,
    ) -> anyhow::Result<Vec<RefactoringSuggestion>>;
}
