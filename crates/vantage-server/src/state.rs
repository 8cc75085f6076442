use crate::config::AppConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use vantage_analysis::{
    AnalysisCoordinator, IdGenerator, RefactorEngine, RefactorRegistry, RuleEngine, RuleRegistry,
};
use vantage_core::Language;
use vantage_core::LanguageParser;
use vantage_parsers::{JsParser, TsParser};
use vantage_storage::AnalysisStore;

/// Central, cloneable application state — one instance per process, built in
/// `main` and threaded through every handler via axum's `State` extractor.
/// Mirrors the teacher's `AppState`, minus the enterprise services (auth,
/// database pool, redis) this spec has no counterpart for.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub rule_registry: Arc<RuleRegistry>,
    pub refactor_registry: Arc<RefactorRegistry>,
    pub coordinator: Arc<AnalysisCoordinator>,
    /// Separate from the coordinator's internal engine: the coordinator
    /// doesn't expose it, and `/api/refactor/apply` needs to apply a
    /// previously-generated suggestion outside the analyze pipeline.
    pub refactor_engine: Arc<RefactorEngine>,
    pub store: Arc<dyn AnalysisStore>,
    pub file_ids: Arc<IdGenerator>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        rule_registry: Arc<RuleRegistry>,
        refactor_registry: Arc<RefactorRegistry>,
        store: Arc<dyn AnalysisStore>,
    ) -> Self {
        let mut parsers: HashMap<Language, Arc<dyn LanguageParser>> = HashMap::new();
        parsers.insert(Language::Js, Arc::new(JsParser::new()));
        parsers.insert(Language::Ts, Arc::new(TsParser::new()));

        let rule_engine = RuleEngine::new(rule_registry.clone(), config.engine.rule_timeout_ms);
        let refactor_engine_for_coordinator = RefactorEngine::new(
            refactor_registry.clone(),
            config.engine.max_suggestions_per_violation,
        );
        let refactor_engine = RefactorEngine::new(
            refactor_registry.clone(),
            config.engine.max_suggestions_per_violation,
        );
        let coordinator =
            AnalysisCoordinator::new(parsers, rule_engine, refactor_engine_for_coordinator);

        Self {
            config: Arc::new(config),
            rule_registry,
            refactor_registry,
            coordinator: Arc::new(coordinator),
            refactor_engine: Arc::new(refactor_engine),
            store,
            file_ids: Arc::new(IdGenerator::new()),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
