use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::response::Json;
use serde::Serialize;
use std::sync::Arc;
use vantage_storage::ListFilter;

#[derive(Debug, Serialize, Default)]
pub struct IssueCounts {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_analyses: usize,
    pub total_files: usize,
    pub issues: IssueCounts,
    pub registered_rules: usize,
    pub registered_providers: usize,
}

/// `GET /api/stats`. Aggregates issue counts across every stored analysis
/// plus the size of the rule/provider catalog currently registered.
pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>, ApiError> {
    let analyses = state.store.list_analyses(ListFilter::default()).await?;
    let files = state.store.list_files().await?;

    let mut issues = IssueCounts::default();
    for analysis in &analyses {
        issues.total += analysis.stats.total_issues;
        issues.critical += analysis.stats.critical_issues;
        issues.high += analysis.stats.high_issues;
        issues.medium += analysis.stats.medium_issues;
        issues.low += analysis.stats.low_issues;
    }

    Ok(Json(StatsResponse {
        total_analyses: analyses.len(),
        total_files: files.len(),
        issues,
        registered_rules: state.rule_registry.len().await,
        registered_providers: state.refactor_registry.get_providers().await.len(),
    }))
}
