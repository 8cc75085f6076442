use crate::id::IdGenerator;
use crate::refactor::{RefactoringContext, RefactoringProvider, RefactoringSuggestion};
use crate::rule::RuleViolation;
use crate::transform::{apply_transformations, TransformError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use vantage_core::{Language, ParseResult};

/// Registers refactoring providers keyed by the rule id they claim.
pub struct RefactorRegistry {
    providers: RwLock<HashMap<String, Arc<dyn RefactoringProvider>>>,
}

impl Default for RefactorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RefactorRegistry {
    pub fn new() -> Self {
        Self {
            providers: RwLock::new(HashMap::new()),
        }
    }

    pub async fn register_provider(&self, provider: Arc<dyn RefactoringProvider>) {
        let rule_id = provider.rule_id().to_string();
        self.providers.write().await.insert(rule_id, provider);
    }

    pub async fn unregister_provider(&self, rule_id: &str) {
        self.providers.write().await.remove(rule_id);
    }

    pub async fn get_provider(&self, rule_id: &str) -> Option<Arc<dyn RefactoringProvider>> {
        self.providers.read().await.get(rule_id).cloned()
    }

    pub async fn get_providers(&self) -> Vec<Arc<dyn RefactoringProvider>> {
        self.providers.read().await.values().cloned().collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefactoringResult {
    pub file_name: String,
    pub language: Language,
    pub total_suggestions: usize,
    pub suggestions: Vec<RefactoringSuggestion>,
    pub execution_time_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedRefactoring {
    pub suggestion_id: String,
    pub file_name: String,
    pub applied_at: chrono::DateTime<Utc>,
    pub original_code: String,
    pub refactored_code: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct RefactorEngine {
    registry: Arc<RefactorRegistry>,
    max_suggestions_per_violation: usize,
    ids: IdGenerator,
}

impl RefactorEngine {
    pub fn new(registry: Arc<RefactorRegistry>, max_suggestions_per_violation: usize) -> Self {
        Self {
            registry,
            max_suggestions_per_violation,
            ids: IdGenerator::new(),
        }
    }

    pub fn registry(&self) -> &Arc<RefactorRegistry> {
        &self.registry
    }

    /// For each violation in order, looks up a provider by `rule_id`; if
    /// found and willing (`can_refactor`), generates suggestions and takes
    /// at most `max_suggestions_per_violation` from the head. A provider
    /// failure is caught and treated as "no suggestions for this violation".
    pub async fn generate_suggestions(
        &self,
        parse_result: &ParseResult,
        violations: &[RuleViolation],
        file_name: &str,
    ) -> RefactoringResult {
        let start = Instant::now();
        let mut suggestions = Vec::new();

        for violation in violations {
            let Some(provider) = self.registry.get_provider(&violation.rule_id).await else {
                continue;
            };
            if !provider.can_refactor(violation) {
                continue;
            }

            let ctx = RefactoringContext {
                parse_result,
                violation,
                file_name,
                source_code: &parse_result.source_code,
            };

            match provider.generate_suggestions(&ctx).await {
                Ok(mut generated) => {
                    generated.truncate(self.max_suggestions_per_violation);
                    for suggestion in &mut generated {
                        if suggestion.id.is_empty() {
                            suggestion.id = self.ids.next_id("suggestion");
                        }
                    }
                    suggestions.extend(generated);
                }
                Err(err) => {
                    tracing::warn!(rule_id = %violation.rule_id, error = %err, "refactoring provider failed");
                }
            }
        }

        RefactoringResult {
            file_name: file_name.to_string(),
            language: parse_result.language,
            total_suggestions: suggestions.len(),
            suggestions,
            execution_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        }
    }

    /// Applies a suggestion's transformations to `source_code`. Never
    /// partially applies: either every transformation lands or the original
    /// text is returned unchanged with `success=false`.
    pub fn apply_refactoring(
        &self,
        suggestion: &RefactoringSuggestion,
        source_code: &str,
        file_name: &str,
    ) -> AppliedRefactoring {
        match apply_transformations(&suggestion.transformations, source_code) {
            Ok(refactored_code) => AppliedRefactoring {
                suggestion_id: suggestion.id.clone(),
                file_name: file_name.to_string(),
                applied_at: Utc::now(),
                original_code: source_code.to_string(),
                refactored_code,
                success: true,
                error: None,
            },
            Err(TransformError { message }) => AppliedRefactoring {
                suggestion_id: suggestion.id.clone(),
                file_name: file_name.to_string(),
                applied_at: Utc::now(),
                original_code: source_code.to_string(),
                refactored_code: source_code.to_string(),
                success: false,
                error: Some(message),
            },
        }
    }

    /// Returns suggestions eligible for unattended application: empty
    /// unless auto-fix is enabled, and otherwise filtered by
    /// `confidence_score >= min_confidence_for_auto_fix`.
    pub fn get_auto_fixable_suggestions<'a>(
        &self,
        suggestions: &'a [RefactoringSuggestion],
        enable_auto_fix: bool,
        min_confidence_for_auto_fix: u8,
    ) -> Vec<&'a RefactoringSuggestion> {
        if !enable_auto_fix {
            return Vec::new();
        }
        suggestions
            .iter()
            .filter(|s| s.confidence_score >= min_confidence_for_auto_fix)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refactor::{CodeTransformation, Confidence, Impact};
    use crate::severity::Severity;
    use async_trait::async_trait;
    use vantage_core::{AstNode, AstNodeKind};

    struct StubProvider;

    #[async_trait]
    impl RefactoringProvider for StubProvider {
        fn rule_id(&self) -> &str {
            "stub-rule"
        }

        async fn generate_suggestions(
            &self,
            _ctx: &RefactoringContext<'_>,
        ) -> anyhow::Result<Vec<RefactoringSuggestion>> {
            Ok(vec![
                suggestion("a", 60),
                suggestion("b", 90),
                suggestion("c", 40),
                suggestion("d", 10),
            ])
        }
    }

    fn suggestion(title: &str, score: u8) -> RefactoringSuggestion {
        RefactoringSuggestion {
            id: String::new(),
            rule_id: "stub-rule".to_string(),
            title: title.to_string(),
            description: String::new(),
            transformations: vec![],
            confidence: Confidence::for_score(score),
            confidence_score: score,
            reasoning: String::new(),
            impact: Impact {
                estimated_time: "1m".to_string(),
                description: None,
            },
            preview: None,
        }
    }

    fn parse_result() -> ParseResult {
        ParseResult {
            ast: AstNode::new(AstNodeKind::Other("program".into())),
            source_code: "var x = 5;".to_string(),
            file_name: "a.js".to_string(),
            language: Language::Js,
            parse_time_ms: 0.0,
            errors: vec![],
        }
    }

    #[tokio::test]
    async fn generate_suggestions_caps_per_violation() {
        let registry = Arc::new(RefactorRegistry::new());
        registry.register_provider(Arc::new(StubProvider)).await;
        let engine = RefactorEngine::new(registry, 3);

        let violation = RuleViolation::new("stub-rule", "msg", Severity::Medium, 1, 0);
        let result = engine
            .generate_suggestions(&parse_result(), &[violation], "a.js")
            .await;

        assert_eq!(result.suggestions.len(), 3);
    }

    #[test]
    fn auto_fixable_suggestions_empty_unless_enabled() {
        let registry = Arc::new(RefactorRegistry::new());
        let engine = RefactorEngine::new(registry, 3);
        let suggestions = vec![suggestion("a", 90)];

        assert!(engine
            .get_auto_fixable_suggestions(&suggestions, false, 80)
            .is_empty());
        assert_eq!(
            engine
                .get_auto_fixable_suggestions(&suggestions, true, 80)
                .len(),
            1
        );
        assert!(engine
            .get_auto_fixable_suggestions(&suggestions, true, 95)
            .is_empty());
    }

    #[test]
    fn apply_refactoring_replaces_column_range() {
        let registry = Arc::new(RefactorRegistry::new());
        let engine = RefactorEngine::new(registry, 3);
        let mut s = suggestion("rename", 90);
        s.transformations = vec![CodeTransformation::replace(1, 4, 1, 5, "y", "rename x to y")];

        let applied = engine.apply_refactoring(&s, "var x = 5;", "a.js");
        assert!(applied.success);
        assert_eq!(applied.refactored_code, "var y = 5;");
    }
}
