use thiserror::Error;

/// Storage-layer failures. The in-memory implementation never returns these
/// today, but the trait contract leaves room for a backend that can fail
/// (disk full, connection lost) without changing callers.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StorageResult<T> = Result<T, StorageError>;
