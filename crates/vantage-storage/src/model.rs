use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vantage_core::Language;

/// A stored uploaded file, addressed by the same opaque id scheme as
/// analyses. `file_type` is the language inferred from the upload's
/// extension (see the upload handler's language-detection rule).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub path: String,
    pub size: usize,
    pub file_type: Language,
    pub uploaded_at: DateTime<Utc>,
}

/// A minimal, reusable code snippet. Keeps the persistence trait's shape
/// symmetric with the teacher's multi-entity persistence crates; not
/// exercised by any HTTP route in `SPEC_FULL.md`, but the storage contract
/// specifies it alongside analyses and files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeTemplate {
    pub id: String,
    pub name: String,
    pub language: Language,
    pub snippet: String,
}
