use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use vantage_analysis::AnalysisResult;
use vantage_core::Language;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub code: Option<String>,
    pub file_name: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: String,
    #[serde(flatten)]
    pub analysis: AnalysisResult,
}

/// `POST /api/analyze`. Runs the full parse → rules → suggestions pipeline
/// on an inline source string and persists the result.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let code = request
        .code
        .ok_or_else(|| ApiError::BadRequest("missing required field: code".to_string()))?;
    let file_name = request
        .file_name
        .ok_or_else(|| ApiError::BadRequest("missing required field: fileName".to_string()))?;
    let language_str = request
        .language
        .ok_or_else(|| ApiError::BadRequest("missing required field: language".to_string()))?;
    let language = Language::from_str(&language_str)
        .map_err(|_| ApiError::BadRequest(format!("unsupported language: {language_str}")))?;

    let result = state.coordinator.analyze(&code, &file_name, language).await?;
    state.store.save_analysis(result.clone()).await?;

    Ok(Json(AnalyzeResponse {
        analysis_id: result.metadata.id.clone(),
        analysis: result,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::state::test_support::test_state;
    use axum::extract::State;

    #[test]
    fn language_from_str_rejects_unknown_values() {
        assert!(Language::from_str("python").is_err());
        assert!(Language::from_str("js").is_ok());
    }

    #[tokio::test]
    async fn parse_error_is_rejected_and_nothing_is_persisted() {
        let state = test_state().await;
        let request = AnalyzeRequest {
            code: Some("const x: number = ;".to_string()),
            file_name: Some("a.ts".to_string()),
            language: Some("ts".to_string()),
        };

        let result = analyze(State(state.clone()), Json(request)).await;
        match result {
            Err(ApiError::ParseFailure(errors)) => assert!(!errors.is_empty()),
            other => panic!("expected ParseFailure, got {other:?}"),
        }

        let stored = state
            .store
            .list_analyses(Default::default())
            .await
            .unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn nested_glide_record_is_flagged_and_persisted() {
        let state = test_state().await;
        let code = r#"
            function outer() {
                while (gr1.next()) {
                    var gr2 = new GlideRecord('problem');
                    gr2.addQuery('incident', gr1.sys_id);
                    gr2.query();
                }
            }
        "#;
        let request = AnalyzeRequest {
            code: Some(code.to_string()),
            file_name: Some("script.js".to_string()),
            language: Some("js".to_string()),
        };

        let response = analyze(State(state.clone()), Json(request))
            .await
            .expect("analysis should succeed");

        let violations: Vec<_> = response
            .analysis
            .issues
            .iter()
            .filter(|issue| issue.rule_id == "glide-nested-query")
            .collect();
        assert!(!violations.is_empty());
        assert_eq!(violations[0].severity, vantage_analysis::Severity::High);

        let suggestions: Vec<_> = response
            .analysis
            .full_suggestions
            .iter()
            .filter(|s| s.rule_id == "glide-nested-query")
            .collect();
        assert!(suggestions.iter().any(|s| s.title.contains("GlideAggregate")
            && s.confidence_score == 65));
        assert!(suggestions
            .iter()
            .any(|s| s.title.contains("encoded query") && s.confidence_score == 85));

        let stored = state.store.get_analysis(&response.analysis_id).await.unwrap();
        assert!(stored.is_some());
    }
}
