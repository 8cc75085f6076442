use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Multipart, State};
use axum::response::Json;
use serde::Serialize;
use std::sync::Arc;
use vantage_analysis::AnalysisResult;
use vantage_core::Language;
use vantage_storage::FileRecord;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_id: String,
    pub file_path: String,
    #[serde(flatten)]
    pub analysis: AnalysisResult,
}

/// `POST /api/upload`. Accepts a single multipart field holding the source
/// file, infers the language from its extension, analyzes it, and persists
/// both the raw bytes and the resulting analysis.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(err.to_string()))?
        .ok_or_else(|| ApiError::BadRequest("no file provided".to_string()))?;

    let file_name = field
        .file_name()
        .map(str::to_string)
        .ok_or_else(|| ApiError::BadRequest("no file provided".to_string()))?;

    let language = language_for_file_name(&file_name).ok_or_else(|| {
        ApiError::BadRequest(format!("unsupported file extension: {file_name}"))
    })?;

    let bytes = field
        .bytes()
        .await
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;
    let code = String::from_utf8(bytes.to_vec())
        .map_err(|_| ApiError::BadRequest("file is not valid UTF-8".to_string()))?;

    let result = state.coordinator.analyze(&code, &file_name, language).await?;
    state.store.save_analysis(result.clone()).await?;

    let file_id = state.file_ids.next_id("file");
    let file_path = format!("/uploads/{file_id}/{file_name}");
    let record = FileRecord {
        id: file_id.clone(),
        name: file_name,
        path: file_path.clone(),
        size: code.len(),
        file_type: language,
        uploaded_at: chrono::Utc::now(),
    };
    state.store.save_file(record, code.into_bytes()).await?;

    Ok(Json(UploadResponse {
        file_id,
        file_path,
        analysis: result,
    }))
}

/// Extension-based language detection per §6: `.ts`/`.tsx` → ts, `.js`/`.jsx`
/// → js, anything else (including no extension) is rejected.
fn language_for_file_name(file_name: &str) -> Option<Language> {
    let extension = file_name.rsplit_once('.')?.1;
    Language::from_extension(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_ts_and_tsx_as_typescript() {
        assert_eq!(language_for_file_name("a.ts"), Some(Language::Ts));
        assert_eq!(language_for_file_name("a.tsx"), Some(Language::Ts));
    }

    #[test]
    fn detects_js_and_jsx_as_javascript() {
        assert_eq!(language_for_file_name("a.js"), Some(Language::Js));
        assert_eq!(language_for_file_name("a.jsx"), Some(Language::Js));
    }

    #[test]
    fn rejects_unsupported_or_missing_extensions() {
        assert_eq!(language_for_file_name("a.py"), None);
        assert_eq!(language_for_file_name("noextension"), None);
    }
}
