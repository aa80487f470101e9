use anyhow::Context;
use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::db::PgStore;
use crate::store::{CandidateStore, Dataset, JsonFileStore, MemoryStore};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CandidateStore>,
}

impl AppState {
    pub fn new_with_store(store: Arc<dyn CandidateStore>) -> Self {
        Self { store }
    }

    /// In-memory state, optionally seeded with the sample candidates.
    pub fn in_memory(seed_demo_data: bool) -> Self {
        let dataset = if seed_demo_data {
            Dataset::demo()
        } else {
            Dataset::default()
        };
        Self::new_with_store(Arc::new(MemoryStore::with_dataset(dataset)))
    }

    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn CandidateStore> = match config.backend {
            StoreBackend::Memory => {
                log::info!("Using in-memory candidate store");
                return Ok(Self::in_memory(config.seed_demo_data));
            }
            StoreBackend::File => {
                let initial = if config.seed_demo_data {
                    Dataset::demo()
                } else {
                    Dataset::default()
                };
                let store = JsonFileStore::open_or_init(&config.data_file, initial)
                    .await
                    .with_context(|| {
                        format!("failed to open data file {}", config.data_file.display())
                    })?;
                log::info!("Using JSON file store at {}", store.path().display());
                Arc::new(store)
            }
            StoreBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL is required for the postgres backend")?;
                let store = PgStore::connect(url)
                    .await
                    .context("failed to connect to PostgreSQL")?;
                log::info!("Using PostgreSQL candidate store");
                Arc::new(store)
            }
        };

        Ok(Self::new_with_store(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_memory_backend_seeding() {
        let mut config = AppConfig {
            backend: StoreBackend::Memory,
            ..AppConfig::default()
        };

        let empty = AppState::from_config(&config).await.unwrap();
        assert!(empty.store.list_all().await.unwrap().is_empty());

        config.seed_demo_data = true;
        let seeded = AppState::from_config(&config).await.unwrap();
        assert_eq!(seeded.store.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_file_backend_creates_data_file() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            backend: StoreBackend::File,
            data_file: dir.path().join("nested").join("admit_cards.json"),
            seed_demo_data: true,
            ..AppConfig::default()
        };

        let state = AppState::from_config(&config).await.unwrap();
        assert!(config.data_file.exists());
        assert_eq!(state.store.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_file_backend_reports_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let data_file = dir.path().join("admit_cards.json");
        std::fs::write(&data_file, "not json").unwrap();
        let config = AppConfig {
            backend: StoreBackend::File,
            data_file,
            ..AppConfig::default()
        };

        let err = AppState::from_config(&config).await.err().unwrap();
        assert!(format!("{:#}", err).contains("failed to open data file"));
    }
}
