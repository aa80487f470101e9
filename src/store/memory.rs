use async_trait::async_trait;
use parking_lot::RwLock;

use super::{CandidateStore, Dataset, StoreError};
use crate::candidate::models::{Candidate, CandidatePage, NewCandidate};
use crate::settings::model::{Allocation, Settings};

/// Store kept entirely in process memory. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Dataset>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            data: RwLock::new(dataset),
        }
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self::with_dataset(Dataset {
            settings,
            ..Dataset::default()
        })
    }
}

#[async_trait]
impl CandidateStore for MemoryStore {
    async fn create(&self, new: NewCandidate) -> Result<Candidate, StoreError> {
        // allocation and insertion share one write lock
        self.data.write().insert(new)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Candidate>, StoreError> {
        Ok(self.data.read().get(id))
    }

    async fn list_all(&self) -> Result<Vec<Candidate>, StoreError> {
        Ok(self.data.read().newest_first())
    }

    async fn list_page(&self, page: u32, page_size: u32) -> Result<CandidatePage, StoreError> {
        Ok(self.data.read().page(page, page_size))
    }

    async fn search(&self, query: &str) -> Result<Vec<Candidate>, StoreError> {
        Ok(self.data.read().search(query))
    }

    async fn update(&self, candidate: Candidate) -> Result<Candidate, StoreError> {
        self.data.write().update(candidate)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.data.write().remove(id))
    }

    async fn get_settings(&self) -> Result<Settings, StoreError> {
        Ok(self.data.read().settings)
    }

    async fn set_settings(&self, settings: Settings) -> Result<Settings, StoreError> {
        self.data.write().settings = settings;
        Ok(settings)
    }

    async fn allocate(&self) -> Result<Allocation, StoreError> {
        self.data.write().allocate()
    }
}
