//! PostgreSQL backend.
//!
//! Split by table:
//! - `candidate` - candidate rows
//! - `settings` - the numbering settings record

mod candidate;
mod settings;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::candidate::models::{Candidate, CandidatePage, NewCandidate};
use crate::settings::model::{Allocation, Settings};
use crate::store::{CandidateStore, StoreError};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS candidates (
        id BIGSERIAL PRIMARY KEY,
        form_no TEXT NOT NULL,
        token_no TEXT NOT NULL,
        name TEXT NOT NULL,
        dob TEXT NOT NULL,
        contact_no TEXT NOT NULL,
        place TEXT NOT NULL,
        photo TEXT,
        exam_date TEXT,
        exam_time TEXT,
        created_at TIMESTAMPTZ DEFAULT NOW(),
        updated_at TIMESTAMPTZ DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS app_settings (
        key TEXT PRIMARY KEY,
        value JSONB NOT NULL
    )
    "#,
];

#[derive(Clone)]
pub struct PgStore {
    pub pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(20)
            .min_connections(1)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .idle_timeout(std::time::Duration::from_secs(900))
            .max_lifetime(std::time::Duration::from_secs(1800))
            .connect(database_url)
            .await?;

        let store = Self::new_with_pool(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub fn new_with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the tables if they do not exist yet.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl CandidateStore for PgStore {
    async fn create(&self, new: NewCandidate) -> Result<Candidate, StoreError> {
        self.insert_candidate(new).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Candidate>, StoreError> {
        Ok(self.get_candidate_by_id(id).await?)
    }

    async fn list_all(&self) -> Result<Vec<Candidate>, StoreError> {
        Ok(self.get_all_candidates().await?)
    }

    async fn list_page(&self, page: u32, page_size: u32) -> Result<CandidatePage, StoreError> {
        Ok(self.get_candidate_page(page, page_size).await?)
    }

    async fn search(&self, query: &str) -> Result<Vec<Candidate>, StoreError> {
        Ok(self.search_candidates(query).await?)
    }

    async fn update(&self, candidate: Candidate) -> Result<Candidate, StoreError> {
        let id = candidate.id;
        self.update_candidate(&candidate)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.delete_candidate(id).await?)
    }

    async fn get_settings(&self) -> Result<Settings, StoreError> {
        Ok(self.load_settings().await?)
    }

    async fn set_settings(&self, settings: Settings) -> Result<Settings, StoreError> {
        self.save_settings(&settings).await?;
        Ok(settings)
    }

    async fn allocate(&self) -> Result<Allocation, StoreError> {
        let mut tx = self.pool.begin().await?;
        let allocation = settings::allocate_in(&mut tx).await?;
        tx.commit().await?;
        Ok(allocation)
    }
}
