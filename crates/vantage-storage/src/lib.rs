//! Persistence interface (C8): a keyed container contract for analyses,
//! uploaded files, and code templates, plus an in-memory implementation.
//! Storage is a trait so the server binary can swap backends without the
//! analysis crates knowing or caring.

pub mod error;
pub mod memory;
pub mod model;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use memory::InMemoryStore;
pub use model::{CodeTemplate, FileRecord};
pub use store::{max_severity_rank, AnalysisStore, ListFilter, SortBy, SortDirection};
