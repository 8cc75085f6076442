use crate::error::StorageResult;
use crate::model::{CodeTemplate, FileRecord};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vantage_analysis::{AnalysisResult, Severity};
use vantage_core::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Date,
    FileName,
    Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Descending
    }
}

/// Equality/membership filters plus sort/pagination for `list_analyses`.
/// All fields are optional; an absent filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub file_name: Option<String>,
    pub language: Option<Language>,
    /// Match-any-issue: an analysis passes if any of its issues carries one
    /// of these severities.
    pub severities: Option<Vec<Severity>>,
    pub sort_by: Option<SortBy>,
    pub sort_direction: SortDirection,
    pub offset: usize,
    pub limit: Option<usize>,
}

/// The persistence contract the coordinator's caller writes to. Only the
/// trait is owned by the core; `memory::InMemoryStore` is the one concrete
/// implementation this workspace ships.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    async fn save_analysis(&self, result: AnalysisResult) -> StorageResult<()>;
    async fn get_analysis(&self, id: &str) -> StorageResult<Option<AnalysisResult>>;
    async fn list_analyses(&self, filter: ListFilter) -> StorageResult<Vec<AnalysisResult>>;
    async fn delete_analysis(&self, id: &str) -> StorageResult<bool>;

    async fn save_file(&self, file: FileRecord, content: Vec<u8>) -> StorageResult<()>;
    async fn get_file(&self, id: &str) -> StorageResult<Option<(FileRecord, Vec<u8>)>>;
    async fn list_files(&self) -> StorageResult<Vec<FileRecord>>;

    async fn save_template(&self, template: CodeTemplate) -> StorageResult<()>;
    async fn get_template(&self, id: &str) -> StorageResult<Option<CodeTemplate>>;
    async fn list_templates(&self) -> StorageResult<Vec<CodeTemplate>>;
}

/// The maximum issue-severity rank in an analysis, or 0 when it has no
/// issues — the key the severity sort orders by (§8 invariant 5).
pub fn max_severity_rank(result: &AnalysisResult) -> u8 {
    result
        .issues
        .iter()
        .map(|issue| issue.severity.rank())
        .max()
        .unwrap_or(0)
}
