use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use vantage_analysis::AnalysisResult;
use vantage_core::Language;
use vantage_storage::{ListFilter, SortBy, SortDirection};

#[derive(Debug, Deserialize)]
pub struct ListAnalysesQuery {
    pub file_name: Option<String>,
    pub language: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ListAnalysesResponse {
    pub count: usize,
    pub results: Vec<AnalysisResult>,
}

/// `GET /api/analysis/:id`.
pub async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisResult>, ApiError> {
    state
        .store
        .get_analysis(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no analysis with id {id}")))
}

/// `GET /api/analyses`.
pub async fn list_analyses(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListAnalysesQuery>,
) -> Result<Json<ListAnalysesResponse>, ApiError> {
    let language = query
        .language
        .map(|language| {
            Language::from_str(&language)
                .map_err(|_| ApiError::BadRequest(format!("unsupported language: {language}")))
        })
        .transpose()?;

    let sort_by = query
        .sort_by
        .map(|value| match value.as_str() {
            "date" => Ok(SortBy::Date),
            "fileName" | "file_name" => Ok(SortBy::FileName),
            "severity" => Ok(SortBy::Severity),
            other => Err(ApiError::BadRequest(format!("unknown sortBy: {other}"))),
        })
        .transpose()?;

    let sort_direction = query
        .sort_direction
        .map(|value| match value.as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(ApiError::BadRequest(format!(
                "unknown sortDirection: {other}"
            ))),
        })
        .transpose()?
        .unwrap_or_default();

    let filter = ListFilter {
        file_name: query.file_name,
        language,
        severities: None,
        sort_by,
        sort_direction,
        offset: query.offset.unwrap_or(0),
        limit: query.limit,
    };

    let results = state.store.list_analyses(filter).await?;
    Ok(Json(ListAnalysesResponse {
        count: results.len(),
        results,
    }))
}
