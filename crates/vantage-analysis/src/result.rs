use crate::refactor::RefactoringSuggestion;
use crate::rule_engine::Issue;
use crate::severity::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vantage_core::Language;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub id: String,
    pub file_name: String,
    pub file_size: usize,
    pub language: Language,
    pub analysis_date: DateTime<Utc>,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisStats {
    pub total_issues: usize,
    pub critical_issues: usize,
    pub high_issues: usize,
    pub medium_issues: usize,
    pub low_issues: usize,
}

impl AnalysisStats {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut stats = AnalysisStats::default();
        stats.total_issues = issues.len();
        for issue in issues {
            match issue.severity {
                Severity::Critical => stats.critical_issues += 1,
                Severity::High => stats.high_issues += 1,
                Severity::Medium => stats.medium_issues += 1,
                Severity::Low => stats.low_issues += 1,
            }
        }
        stats
    }
}

/// The storage-friendly projection of a suggestion, as derived by the
/// coordinator's step 6 (`category` is always "refactoring"; `effort` mirrors
/// the full suggestion's `impact.estimated_time`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub effort: String,
}

impl From<&RefactoringSuggestion> for SuggestionView {
    fn from(suggestion: &RefactoringSuggestion) -> Self {
        Self {
            id: suggestion.id.clone(),
            title: suggestion.title.clone(),
            description: suggestion.description.clone(),
            category: "refactoring".to_string(),
            effort: suggestion.impact.estimated_time.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub metadata: AnalysisMetadata,
    pub issues: Vec<Issue>,
    pub suggestions: Vec<SuggestionView>,
    pub stats: AnalysisStats,
    /// Full suggestions, including transformations, kept alongside the
    /// analysis so `POST /api/refactor/apply` can look one up by id without
    /// regenerating it (see the "suggestion application without storage"
    /// design note).
    pub full_suggestions: Vec<RefactoringSuggestion>,
}

impl AnalysisResult {
    pub fn find_suggestion(&self, suggestion_id: &str) -> Option<&RefactoringSuggestion> {
        self.full_suggestions.iter().find(|s| s.id == suggestion_id)
    }
}
