use crate::error::StorageResult;
use crate::model::{CodeTemplate, FileRecord};
use crate::store::{max_severity_rank, AnalysisStore, ListFilter, SortBy, SortDirection};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use vantage_analysis::AnalysisResult;

/// A keyed, in-memory `AnalysisStore`. Mirrors the teacher's
/// `Arc<RwLock<HashMap<..>>>` registry discipline: many readers for list/get,
/// an exclusive writer for save/delete. Data does not survive the process —
/// this satisfies §4.6's contract without committing to a wire format.
#[derive(Default)]
pub struct InMemoryStore {
    analyses: RwLock<HashMap<String, AnalysisResult>>,
    files: RwLock<HashMap<String, (FileRecord, Vec<u8>)>>,
    templates: RwLock<HashMap<String, CodeTemplate>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisStore for InMemoryStore {
    async fn save_analysis(&self, result: AnalysisResult) -> StorageResult<()> {
        self.analyses
            .write()
            .await
            .insert(result.metadata.id.clone(), result);
        Ok(())
    }

    async fn get_analysis(&self, id: &str) -> StorageResult<Option<AnalysisResult>> {
        Ok(self.analyses.read().await.get(id).cloned())
    }

    async fn list_analyses(&self, filter: ListFilter) -> StorageResult<Vec<AnalysisResult>> {
        let analyses = self.analyses.read().await;
        let mut matched: Vec<AnalysisResult> = analyses
            .values()
            .filter(|a| {
                filter
                    .file_name
                    .as_ref()
                    .map(|name| &a.metadata.file_name == name)
                    .unwrap_or(true)
            })
            .filter(|a| {
                filter
                    .language
                    .map(|language| a.metadata.language == language)
                    .unwrap_or(true)
            })
            .filter(|a| {
                filter
                    .severities
                    .as_ref()
                    .map(|wanted| a.issues.iter().any(|issue| wanted.contains(&issue.severity)))
                    .unwrap_or(true)
            })
            .cloned()
            .collect();

        if let Some(sort_by) = filter.sort_by {
            matched.sort_by(|a, b| match sort_by {
                SortBy::Date => a.metadata.analysis_date.cmp(&b.metadata.analysis_date),
                SortBy::FileName => a.metadata.file_name.cmp(&b.metadata.file_name),
                SortBy::Severity => max_severity_rank(a).cmp(&max_severity_rank(b)),
            });
            if filter.sort_direction == SortDirection::Descending {
                matched.reverse();
            }
        }

        let start = filter.offset.min(matched.len());
        let end = match filter.limit {
            Some(limit) => (start + limit).min(matched.len()),
            None => matched.len(),
        };
        Ok(matched[start..end].to_vec())
    }

    async fn delete_analysis(&self, id: &str) -> StorageResult<bool> {
        Ok(self.analyses.write().await.remove(id).is_some())
    }

    async fn save_file(&self, file: FileRecord, content: Vec<u8>) -> StorageResult<()> {
        self.files.write().await.insert(file.id.clone(), (file, content));
        Ok(())
    }

    async fn get_file(&self, id: &str) -> StorageResult<Option<(FileRecord, Vec<u8>)>> {
        Ok(self.files.read().await.get(id).cloned())
    }

    async fn list_files(&self) -> StorageResult<Vec<FileRecord>> {
        Ok(self
            .files
            .read()
            .await
            .values()
            .map(|(record, _)| record.clone())
            .collect())
    }

    async fn save_template(&self, template: CodeTemplate) -> StorageResult<()> {
        self.templates.write().await.insert(template.id.clone(), template);
        Ok(())
    }

    async fn get_template(&self, id: &str) -> StorageResult<Option<CodeTemplate>> {
        Ok(self.templates.read().await.get(id).cloned())
    }

    async fn list_templates(&self) -> StorageResult<Vec<CodeTemplate>> {
        Ok(self.templates.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_analysis::{AnalysisMetadata, AnalysisStats, Issue, Severity};
    use vantage_core::Language;

    fn analysis(id: &str, file_name: &str, severity: Severity, date: chrono::DateTime<chrono::Utc>) -> AnalysisResult {
        let issues = vec![Issue {
            id: format!("{id}-issue"),
            rule_id: "stub-rule".to_string(),
            kind: "stub-rule".to_string(),
            message: "stub".to_string(),
            severity,
            line: 1,
            column: 0,
            end_line: None,
            end_column: None,
            file_name: file_name.to_string(),
        }];
        AnalysisResult {
            metadata: AnalysisMetadata {
                id: id.to_string(),
                file_name: file_name.to_string(),
                file_size: 10,
                language: Language::Js,
                analysis_date: date,
                duration_ms: 1.0,
            },
            stats: AnalysisStats::from_issues(&issues),
            issues,
            suggestions: vec![],
            full_suggestions: vec![],
        }
    }

    #[tokio::test]
    async fn round_trips_structural_equality() {
        let store = InMemoryStore::new();
        let record = analysis("a-1", "a.js", Severity::High, chrono::Utc::now());
        store.save_analysis(record.clone()).await.unwrap();

        let fetched = store.get_analysis("a-1").await.unwrap().unwrap();
        assert_eq!(fetched.metadata.id, record.metadata.id);
        assert_eq!(fetched.stats.total_issues, record.stats.total_issues);
    }

    #[tokio::test]
    async fn severity_sort_descending_orders_critical_before_empty() {
        let store = InMemoryStore::new();
        let now = chrono::Utc::now();
        store
            .save_analysis(analysis("low", "a.js", Severity::Low, now))
            .await
            .unwrap();
        store
            .save_analysis(analysis("critical", "b.js", Severity::Critical, now))
            .await
            .unwrap();
        store
            .save_analysis(analysis("high", "c.js", Severity::High, now))
            .await
            .unwrap();

        let results = store
            .list_analyses(ListFilter {
                sort_by: Some(SortBy::Severity),
                sort_direction: SortDirection::Descending,
                ..Default::default()
            })
            .await
            .unwrap();

        let ids: Vec<&str> = results.iter().map(|r| r.metadata.id.as_str()).collect();
        assert_eq!(ids, vec!["critical", "high", "low"]);
    }

    #[tokio::test]
    async fn file_name_filter_matches_equality_only() {
        let store = InMemoryStore::new();
        let now = chrono::Utc::now();
        store
            .save_analysis(analysis("a", "a.js", Severity::Medium, now))
            .await
            .unwrap();
        store
            .save_analysis(analysis("b", "b.js", Severity::Medium, now))
            .await
            .unwrap();

        let results = store
            .list_analyses(ListFilter {
                file_name: Some("a.js".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].metadata.id, "a");
    }

    #[tokio::test]
    async fn pagination_respects_offset_and_limit() {
        let store = InMemoryStore::new();
        let now = chrono::Utc::now();
        for i in 0..5 {
            store
                .save_analysis(analysis(&format!("a{i}"), "a.js", Severity::Medium, now))
                .await
                .unwrap();
        }

        let results = store
            .list_analyses(ListFilter {
                offset: 2,
                limit: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn delete_removes_and_reports_whether_anything_was_removed() {
        let store = InMemoryStore::new();
        store
            .save_analysis(analysis("a", "a.js", Severity::Medium, chrono::Utc::now()))
            .await
            .unwrap();

        assert!(store.delete_analysis("a").await.unwrap());
        assert!(!store.delete_analysis("a").await.unwrap());
        assert!(store.get_analysis("a").await.unwrap().is_none());
    }
}
