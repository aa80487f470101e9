//! Candidate persistence.
//!
//! Handlers and the allocator depend only on [`CandidateStore`]. Backends:
//! - `memory` - process-local, lock protected
//! - `file` - a JSON document on disk, rewritten atomically on each change
//! - `crate::db::PgStore` - PostgreSQL

pub mod dataset;
pub mod file;
pub mod memory;


pub use dataset::Dataset;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::candidate::models::{Candidate, CandidatePage, NewCandidate};
use crate::settings::model::{Allocation, Settings};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("candidate {0} not found")]
    NotFound(i64),
    #[error("numbering counters cannot be advanced any further")]
    CounterOverflow,
    #[error("store file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store data could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Repository of candidates and the numbering settings.
///
/// Listing, paging and search return the most recently created candidates
/// first. `create` allocates form/token numbers and inserts the record as one
/// unit: if either half fails, no number is consumed.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Allocate numbers and insert a new candidate.
    async fn create(&self, new: NewCandidate) -> Result<Candidate, StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Candidate>, StoreError>;

    async fn list_all(&self) -> Result<Vec<Candidate>, StoreError>;

    /// One 1-based page of [`CandidateStore::list_all`]; page 0 is treated as 1.
    async fn list_page(&self, page: u32, page_size: u32) -> Result<CandidatePage, StoreError>;

    /// Case-insensitive substring search over name, form no, token no and place.
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, StoreError>;

    /// Replace the editable fields of an existing candidate.
    ///
    /// Form/token numbers and `created_at` keep their stored values.
    async fn update(&self, candidate: Candidate) -> Result<Candidate, StoreError>;

    /// Returns `false` when no candidate had this id.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Current settings, created with defaults on first access.
    async fn get_settings(&self) -> Result<Settings, StoreError>;

    async fn set_settings(&self, settings: Settings) -> Result<Settings, StoreError>;

    /// Reserve the next form/token pair without creating a candidate.
    async fn allocate(&self) -> Result<Allocation, StoreError>;
}

/// Lowercased, trimmed search needle.
pub(crate) fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}
