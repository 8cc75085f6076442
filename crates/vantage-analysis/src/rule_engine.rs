use crate::rule::{Rule, RuleConfig, RuleContext, RuleExecutionResult, RuleViolation};
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use vantage_core::ParseResult;

/// Registers rules and their per-rule configuration. Mirrors the teacher
/// platform's `Arc<RwLock<HashMap<..>>>` registry discipline: many readers
/// during `execute`, an exclusive writer for register/unregister.
pub struct RuleRegistry {
    rules: RwLock<HashMap<String, Arc<dyn Rule>>>,
    configs: RwLock<HashMap<String, RuleConfig>>,
    /// Registration order, since execution order must be deterministic.
    order: RwLock<Vec<String>>,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self {
            rules: RwLock::new(HashMap::new()),
            configs: RwLock::new(HashMap::new()),
            order: RwLock::new(Vec::new()),
        }
    }

    /// Stores the rule by id, replacing any prior registration with the
    /// same id. Installs a default config if none exists yet; an existing
    /// config survives re-registration.
    pub async fn register_rule(&self, rule: Arc<dyn Rule>) {
        let id = rule.metadata().id.clone();
        let mut rules = self.rules.write().await;
        let is_new = !rules.contains_key(&id);
        rules.insert(id.clone(), rule);
        drop(rules);

        if is_new {
            self.order.write().await.push(id.clone());
        }

        let mut configs = self.configs.write().await;
        configs.entry(id).or_insert_with(RuleConfig::default);
    }

    pub async fn unregister_rule(&self, id: &str) {
        self.rules.write().await.remove(id);
        self.configs.write().await.remove(id);
        self.order.write().await.retain(|existing| existing != id);
    }

    pub async fn enable_rule(&self, id: &str) {
        if let Some(config) = self.configs.write().await.get_mut(id) {
            config.enabled = true;
        }
    }

    pub async fn disable_rule(&self, id: &str) {
        if let Some(config) = self.configs.write().await.get_mut(id) {
            config.enabled = false;
        }
    }

    pub async fn get_rule(&self, id: &str) -> Option<Arc<dyn Rule>> {
        self.rules.read().await.get(id).cloned()
    }

    pub async fn get_config(&self, id: &str) -> Option<RuleConfig> {
        self.configs.read().await.get(id).cloned()
    }

    /// All registered rules, in registration order.
    pub async fn get_rules(&self) -> Vec<Arc<dyn Rule>> {
        let order = self.order.read().await;
        let rules = self.rules.read().await;
        order.iter().filter_map(|id| rules.get(id).cloned()).collect()
    }

    pub async fn len(&self) -> usize {
        self.rules.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// A flat, storage-friendly projection of a violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub rule_id: String,
    /// Per the coordinator algorithm: a copy of `ruleId`, not a distinct tag.
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub severity: Severity,
    pub line: usize,
    pub column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEngineResult {
    pub results: Vec<RuleExecutionResult>,
    pub violations: Vec<RuleViolation>,
    pub total_execution_time_ms: f64,
}

pub struct RuleEngine {
    registry: Arc<RuleRegistry>,
    rule_timeout: Duration,
}

impl RuleEngine {
    pub fn new(registry: Arc<RuleRegistry>, rule_timeout_ms: u64) -> Self {
        Self {
            registry,
            rule_timeout: Duration::from_millis(rule_timeout_ms),
        }
    }

    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    /// Runs every enabled, language-applicable rule against `parse_result`,
    /// in registration order, subject to the per-rule wall-clock deadline.
    pub async fn execute(&self, parse_result: &ParseResult, file_name: &str) -> RuleEngineResult {
        let sweep_start = Instant::now();
        let mut results = Vec::new();
        let mut violations = Vec::new();

        for rule in self.registry.get_rules().await {
            let metadata = rule.metadata();
            let config = match self.registry.get_config(&metadata.id).await {
                Some(config) => config,
                None => continue,
            };
            if !config.enabled || !metadata.language.matches(parse_result.language) {
                continue;
            }

            let ctx = RuleContext {
                parse_result,
                file_name,
                source_code: &parse_result.source_code,
                options: &config.options,
            };

            let rule_start = Instant::now();
            let outcome = tokio::time::timeout(self.rule_timeout, rule.check(&ctx)).await;
            let execution_time_ms = rule_start.elapsed().as_secs_f64() * 1000.0;

            let (rule_violations, error) = match outcome {
                Ok(Ok(mut found)) => {
                    if let Some(severity_override) = config.severity_override {
                        for violation in &mut found {
                            violation.severity = severity_override;
                        }
                    }
                    (found, None)
                }
                Ok(Err(err)) => (Vec::new(), Some(err.to_string())),
                Err(_) => (Vec::new(), Some("Rule execution timeout".to_string())),
            };

            violations.extend(rule_violations.iter().cloned());
            results.push(RuleExecutionResult {
                rule_id: metadata.id.clone(),
                violations: rule_violations,
                execution_time_ms,
                error,
            });
        }

        RuleEngineResult {
            results,
            violations,
            total_execution_time_ms: sweep_start.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

pub fn violations_to_issues(violations: &[RuleViolation], file_name: &str) -> Vec<Issue> {
    violations
        .iter()
        .enumerate()
        .map(|(index, violation)| Issue {
            id: format!("{}-{}", violation.rule_id, index),
            rule_id: violation.rule_id.clone(),
            kind: violation.rule_id.clone(),
            message: violation.message.clone(),
            severity: violation.severity,
            line: violation.line,
            column: violation.column,
            end_line: violation.end_line,
            end_column: violation.end_column,
            file_name: file_name.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleMetadata;
    use crate::severity::{RuleCategory, RuleLanguage};
    use async_trait::async_trait;
    use vantage_core::{AstNode, AstNodeKind, Language, ParseResult};

    struct AlwaysViolatesRule {
        metadata: RuleMetadata,
    }

    #[async_trait]
    impl Rule for AlwaysViolatesRule {
        fn metadata(&self) -> &RuleMetadata {
            &self.metadata
        }

        async fn check(&self, _ctx: &RuleContext<'_>) -> anyhow::Result<Vec<RuleViolation>> {
            Ok(vec![RuleViolation::new(
                "always",
                "always violates",
                Severity::Medium,
                1,
                0,
            )])
        }
    }

    struct SleepyRule {
        metadata: RuleMetadata,
    }

    #[async_trait]
    impl Rule for SleepyRule {
        fn metadata(&self) -> &RuleMetadata {
            &self.metadata
        }

        async fn check(&self, _ctx: &RuleContext<'_>) -> anyhow::Result<Vec<RuleViolation>> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(vec![])
        }
    }

    fn metadata(id: &str) -> RuleMetadata {
        RuleMetadata {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            category: RuleCategory::BestPractice,
            severity: Severity::Medium,
            language: RuleLanguage::Both,
            tags: vec![],
            documentation: None,
        }
    }

    fn empty_parse_result() -> ParseResult {
        ParseResult {
            ast: AstNode::new(AstNodeKind::Other("program".into())),
            source_code: String::new(),
            file_name: "a.js".to_string(),
            language: Language::Js,
            parse_time_ms: 0.0,
            errors: vec![],
        }
    }

    #[tokio::test]
    async fn registering_twice_replaces_not_duplicates() {
        let registry = RuleRegistry::new();
        registry
            .register_rule(Arc::new(AlwaysViolatesRule {
                metadata: metadata("always"),
            }))
            .await;
        registry
            .register_rule(Arc::new(AlwaysViolatesRule {
                metadata: metadata("always"),
            }))
            .await;
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn execute_collects_violations_in_registration_order() {
        let registry = Arc::new(RuleRegistry::new());
        registry
            .register_rule(Arc::new(AlwaysViolatesRule {
                metadata: metadata("always"),
            }))
            .await;
        let engine = RuleEngine::new(registry, 5000);
        let result = engine.execute(&empty_parse_result(), "a.js").await;
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.results.len(), 1);
        assert!(result.results[0].error.is_none());
    }

    #[tokio::test]
    async fn timeout_produces_zero_violations_and_timeout_error() {
        let registry = Arc::new(RuleRegistry::new());
        registry
            .register_rule(Arc::new(SleepyRule {
                metadata: metadata("sleepy"),
            }))
            .await;
        let engine = RuleEngine::new(registry, 10);
        let result = engine.execute(&empty_parse_result(), "a.js").await;
        assert_eq!(result.violations.len(), 0);
        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].error.as_deref(), Some("Rule execution timeout"));
    }

    #[tokio::test]
    async fn severity_override_rewrites_emitted_violations() {
        let registry = Arc::new(RuleRegistry::new());
        registry
            .register_rule(Arc::new(AlwaysViolatesRule {
                metadata: metadata("always"),
            }))
            .await;
        {
            let mut configs = registry.configs.write().await;
            configs.get_mut("always").unwrap().severity_override = Some(Severity::Critical);
        }
        let engine = RuleEngine::new(registry, 5000);
        let result = engine.execute(&empty_parse_result(), "a.js").await;
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].severity, Severity::Critical);
    }

    #[tokio::test]
    async fn disabled_rule_does_not_execute() {
        let registry = Arc::new(RuleRegistry::new());
        registry
            .register_rule(Arc::new(AlwaysViolatesRule {
                metadata: metadata("always"),
            }))
            .await;
        registry.disable_rule("always").await;
        let engine = RuleEngine::new(registry, 5000);
        let result = engine.execute(&empty_parse_result(), "a.js").await;
        assert_eq!(result.results.len(), 0);
    }
}
