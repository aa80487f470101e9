//! Store backed by a single JSON document on disk.
//!
//! Every mutation is applied to a copy of the dataset, written to a sibling
//! temp file and renamed over the original. The in-memory copy is replaced
//! only after the rename succeeds, so a failed write leaves both the file and
//! the served data as they were.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::{CandidateStore, Dataset, StoreError};
use crate::candidate::models::{Candidate, CandidatePage, NewCandidate};
use crate::settings::model::{Allocation, Settings};

pub struct JsonFileStore {
    path: PathBuf,
    data: Mutex<Dataset>,
}

impl JsonFileStore {
    /// Open the store at `path`, creating it with `initial` if it does not exist.
    pub async fn open_or_init(path: impl Into<PathBuf>, initial: Dataset) -> Result<Self, StoreError> {
        let path = path.into();

        let dataset = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let dataset: Dataset = serde_json::from_slice(&bytes)?;
                log::info!(
                    "Loaded {} candidates from {}",
                    dataset.candidates.len(),
                    path.display()
                );
                dataset
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Creating candidate store at {}", path.display());
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                write_atomically(&path, &initial).await?;
                initial
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            data: Mutex::new(dataset),
        })
    }

    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::open_or_init(path, Dataset::default()).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `change` on a copy of the dataset and persist it before committing.
    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut Dataset) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.data.lock().await;
        let mut next = guard.clone();
        let result = change(&mut next)?;
        write_atomically(&self.path, &next).await?;
        *guard = next;
        Ok(result)
    }
}

async fn write_atomically(path: &Path, dataset: &Dataset) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(dataset)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl CandidateStore for JsonFileStore {
    async fn create(&self, new: NewCandidate) -> Result<Candidate, StoreError> {
        self.mutate(|data| data.insert(new)).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Candidate>, StoreError> {
        Ok(self.data.lock().await.get(id))
    }

    async fn list_all(&self) -> Result<Vec<Candidate>, StoreError> {
        Ok(self.data.lock().await.newest_first())
    }

    async fn list_page(&self, page: u32, page_size: u32) -> Result<CandidatePage, StoreError> {
        Ok(self.data.lock().await.page(page, page_size))
    }

    async fn search(&self, query: &str) -> Result<Vec<Candidate>, StoreError> {
        Ok(self.data.lock().await.search(query))
    }

    async fn update(&self, candidate: Candidate) -> Result<Candidate, StoreError> {
        self.mutate(|data| data.update(candidate)).await
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut guard = self.data.lock().await;
        if guard.get(id).is_none() {
            return Ok(false);
        }

        let mut next = guard.clone();
        next.remove(id);
        write_atomically(&self.path, &next).await?;
        *guard = next;
        Ok(true)
    }

    async fn get_settings(&self) -> Result<Settings, StoreError> {
        Ok(self.data.lock().await.settings)
    }

    async fn set_settings(&self, settings: Settings) -> Result<Settings, StoreError> {
        self.mutate(|data| {
            data.settings = settings;
            Ok(settings)
        })
        .await
    }

    async fn allocate(&self) -> Result<Allocation, StoreError> {
        self.mutate(|data| data.allocate()).await
    }
}
