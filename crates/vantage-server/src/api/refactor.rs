use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;
use std::sync::Arc;
use vantage_analysis::AppliedRefactoring;
use vantage_storage::ListFilter;

#[derive(Debug, Deserialize)]
pub struct ApplyRefactoringRequest {
    pub suggestion_id: Option<String>,
    pub code: Option<String>,
    pub file_name: Option<String>,
}

/// `POST /api/refactor/apply`. Resolves `suggestionId` against the
/// suggestions persisted alongside every prior analysis. A suggestion id
/// that matches nothing stored is a 404, not the placeholder 501 a
/// storage-less deployment would need.
pub async fn apply_refactoring(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ApplyRefactoringRequest>,
) -> Result<Json<AppliedRefactoring>, ApiError> {
    let suggestion_id = request
        .suggestion_id
        .ok_or_else(|| ApiError::BadRequest("missing required field: suggestionId".to_string()))?;
    let code = request
        .code
        .ok_or_else(|| ApiError::BadRequest("missing required field: code".to_string()))?;
    let file_name = request
        .file_name
        .ok_or_else(|| ApiError::BadRequest("missing required field: fileName".to_string()))?;

    let analyses = state.store.list_analyses(ListFilter::default()).await?;
    let suggestion = analyses
        .iter()
        .find_map(|analysis| analysis.find_suggestion(&suggestion_id))
        .ok_or_else(|| ApiError::NotFound(format!("no suggestion with id {suggestion_id}")))?;

    let applied = state
        .refactor_engine
        .apply_refactoring(suggestion, &code, &file_name);
    Ok(Json(applied))
}
