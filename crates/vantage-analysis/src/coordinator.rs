use crate::id::IdGenerator;
use crate::refactor_engine::RefactorEngine;
use crate::result::{AnalysisMetadata, AnalysisResult, AnalysisStats, SuggestionView};
use crate::rule_engine::{violations_to_issues, RuleEngine};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use vantage_core::{CoreError, CoreResult, Language, LanguageParser};

/// Orchestrates parse → rules → suggestions → result assembly for one file.
///
/// Persistence is deliberately not this coordinator's concern: `vantage-
/// storage` depends on the result types defined here, so having this crate
/// call back into storage would be circular. The caller (the HTTP handler in
/// `vantage-server`) persists the returned `AnalysisResult`.
pub struct AnalysisCoordinator {
    parsers: HashMap<Language, Arc<dyn LanguageParser>>,
    rule_engine: RuleEngine,
    refactor_engine: RefactorEngine,
    ids: IdGenerator,
}

impl AnalysisCoordinator {
    pub fn new(
        parsers: HashMap<Language, Arc<dyn LanguageParser>>,
        rule_engine: RuleEngine,
        refactor_engine: RefactorEngine,
    ) -> Self {
        Self {
            parsers,
            rule_engine,
            refactor_engine,
            ids: IdGenerator::new(),
        }
    }

    pub async fn analyze(
        &self,
        source: &str,
        file_name: &str,
        language: Language,
    ) -> CoreResult<AnalysisResult> {
        let parser = self
            .parsers
            .get(&language)
            .ok_or_else(|| CoreError::UnsupportedLanguage(language.to_string()))?;

        let parse_result = parser.parse(source, file_name);

        if !parse_result.is_usable() {
            return Err(CoreError::ParseFailure {
                errors: parse_result.errors.clone(),
            });
        }

        let rule_result = self.rule_engine.execute(&parse_result, file_name).await;
        let refactor_result = self
            .refactor_engine
            .generate_suggestions(&parse_result, &rule_result.violations, file_name)
            .await;

        let issues = violations_to_issues(&rule_result.violations, file_name);
        let stats = AnalysisStats::from_issues(&issues);
        let suggestions: Vec<SuggestionView> =
            refactor_result.suggestions.iter().map(SuggestionView::from).collect();

        let metadata = AnalysisMetadata {
            id: self.ids.next_id("analysis"),
            file_name: file_name.to_string(),
            file_size: source.len(),
            language,
            analysis_date: Utc::now(),
            duration_ms: rule_result.total_execution_time_ms + refactor_result.execution_time_ms,
        };

        Ok(AnalysisResult {
            metadata,
            issues,
            suggestions,
            stats,
            full_suggestions: refactor_result.suggestions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refactor_engine::RefactorRegistry;
    use crate::rule_engine::RuleRegistry;
    use vantage_core::{AstNode, AstNodeKind, ParseError, ParseResult};

    struct StubParser {
        language: Language,
    }

    impl LanguageParser for StubParser {
        fn language(&self) -> Language {
            self.language
        }

        fn parse(&self, source: &str, file_name: &str) -> ParseResult {
            ParseResult {
                ast: AstNode::new(AstNodeKind::Other("program".into())),
                source_code: source.to_string(),
                file_name: file_name.to_string(),
                language: self.language,
                parse_time_ms: 0.1,
                errors: vec![],
            }
        }
    }

    struct BrokenParser;

    impl LanguageParser for BrokenParser {
        fn language(&self) -> Language {
            Language::Ts
        }

        fn parse(&self, source: &str, file_name: &str) -> ParseResult {
            ParseResult {
                ast: AstNode::new(AstNodeKind::Other("program".into())),
                source_code: source.to_string(),
                file_name: file_name.to_string(),
                language: Language::Ts,
                parse_time_ms: 0.1,
                errors: vec![ParseError {
                    message: "unexpected token".to_string(),
                    line: 1,
                    column: 18,
                    index: None,
                }],
            }
        }
    }

    fn build_coordinator(parsers: HashMap<Language, Arc<dyn LanguageParser>>) -> AnalysisCoordinator {
        let rule_engine = RuleEngine::new(Arc::new(RuleRegistry::new()), 5000);
        let refactor_engine = RefactorEngine::new(Arc::new(RefactorRegistry::new()), 3);
        AnalysisCoordinator::new(parsers, rule_engine, refactor_engine)
    }

    #[tokio::test]
    async fn empty_source_analyzes_cleanly() {
        let mut parsers: HashMap<Language, Arc<dyn LanguageParser>> = HashMap::new();
        parsers.insert(Language::Js, Arc::new(StubParser { language: Language::Js }));
        let coordinator = build_coordinator(parsers);

        let result = coordinator.analyze("", "empty.js", Language::Js).await.unwrap();
        assert_eq!(result.stats.total_issues, 0);
        assert!(result.suggestions.is_empty());
    }

    #[tokio::test]
    async fn unsupported_language_is_rejected() {
        let coordinator = build_coordinator(HashMap::new());
        let err = coordinator
            .analyze("const x = 1;", "a.js", Language::Js)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedLanguage(_)));
    }

    #[tokio::test]
    async fn parse_errors_short_circuit_before_rules_run() {
        let mut parsers: HashMap<Language, Arc<dyn LanguageParser>> = HashMap::new();
        parsers.insert(Language::Ts, Arc::new(BrokenParser));
        let coordinator = build_coordinator(parsers);

        let err = coordinator
            .analyze("const x: number = ;", "a.ts", Language::Ts)
            .await
            .unwrap_err();
        match err {
            CoreError::ParseFailure { errors } => assert_eq!(errors.len(), 1),
            other => panic!("expected ParseFailure, got {other:?}"),
        }
    }
}
