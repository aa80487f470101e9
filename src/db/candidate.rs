//! Candidate database operations

use super::PgStore;
use crate::candidate::models::{total_pages, Candidate, CandidatePage, NewCandidate};
use crate::store::{normalize_query, StoreError};

const COLUMNS: &str = "id, form_no, token_no, name, dob, contact_no, place, photo, exam_date, \
                       exam_time, created_at, updated_at";

impl PgStore {
    /// Allocate numbers and insert in one transaction.
    pub async fn insert_candidate(&self, new: NewCandidate) -> Result<Candidate, StoreError> {
        let mut tx = self.pool.begin().await?;
        let allocation = super::settings::allocate_in(&mut tx).await?;

        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            r#"
            INSERT INTO candidates
                (form_no, token_no, name, dob, contact_no, place, photo, exam_date, exam_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&allocation.form_no)
        .bind(&allocation.token_no)
        .bind(&new.name)
        .bind(&new.dob)
        .bind(&new.contact_no)
        .bind(&new.place)
        .bind(new.photo.as_deref())
        .bind(new.exam_date.as_deref())
        .bind(new.exam_time.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(candidate)
    }

    pub async fn get_candidate_by_id(&self, id: i64) -> Result<Option<Candidate>, sqlx::Error> {
        sqlx::query_as::<_, Candidate>(&format!("SELECT {COLUMNS} FROM candidates WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn get_all_candidates(&self) -> Result<Vec<Candidate>, sqlx::Error> {
        sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {COLUMNS} FROM candidates ORDER BY id DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get_candidate_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<CandidatePage, sqlx::Error> {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let offset = i64::from(page - 1) * i64::from(page_size);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM candidates")
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {COLUMNS} FROM candidates ORDER BY id DESC LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(page_size))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = total.max(0) as u64;
        Ok(CandidatePage {
            items,
            total,
            page,
            page_size,
            total_pages: total_pages(total, page_size),
        })
    }

    pub async fn search_candidates(&self, query: &str) -> Result<Vec<Candidate>, sqlx::Error> {
        // POSITION keeps '%' and '_' in the query literal, unlike LIKE
        sqlx::query_as::<_, Candidate>(&format!(
            r#"
            SELECT {COLUMNS} FROM candidates
            WHERE POSITION($1 IN LOWER(name)) > 0
               OR POSITION($1 IN LOWER(form_no)) > 0
               OR POSITION($1 IN LOWER(token_no)) > 0
               OR POSITION($1 IN LOWER(place)) > 0
            ORDER BY id DESC
            "#
        ))
        .bind(normalize_query(query))
        .fetch_all(&self.pool)
        .await
    }

    /// Update editable columns. Returns `None` when the id does not exist.
    pub async fn update_candidate(
        &self,
        candidate: &Candidate,
    ) -> Result<Option<Candidate>, sqlx::Error> {
        sqlx::query_as::<_, Candidate>(&format!(
            r#"
            UPDATE candidates
            SET name = $2, dob = $3, contact_no = $4, place = $5,
                photo = $6, exam_date = $7, exam_time = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(candidate.id)
        .bind(&candidate.name)
        .bind(&candidate.dob)
        .bind(&candidate.contact_no)
        .bind(&candidate.place)
        .bind(candidate.photo.as_deref())
        .bind(candidate.exam_date.as_deref())
        .bind(candidate.exam_time.as_deref())
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete_candidate(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::model::Settings;
    use crate::store::CandidateStore;

    // These tests need a disposable PostgreSQL database.
    // Run with: TEST_DATABASE_URL=postgres://... cargo test -- --ignored

    async fn test_store() -> PgStore {
        dotenvy::dotenv().ok();
        let url = std::env::var("TEST_DATABASE_URL")
            .expect("TEST_DATABASE_URL must be set for database tests");
        let store = PgStore::connect(&url).await.unwrap();
        sqlx::query("TRUNCATE TABLE candidates RESTART IDENTITY")
            .execute(&store.pool)
            .await
            .unwrap();
        sqlx::query("DELETE FROM app_settings")
            .execute(&store.pool)
            .await
            .unwrap();
        store
    }

    fn new_candidate(name: &str) -> NewCandidate {
        NewCandidate {
            name: name.to_string(),
            dob: "12-3-2013".to_string(),
            contact_no: "9902700413".to_string(),
            place: "Puttur".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    #[ignore = "requires database connection"]
    async fn test_create_allocates_in_transaction() {
        let store = test_store().await;
        store
            .set_settings(Settings {
                next_form_number: 100,
                next_token_number: 1,
            })
            .await
            .unwrap();

        let created = store.create(new_candidate("Faaz Ahmad")).await.unwrap();
        assert_eq!(created.form_no, "100");
        assert_eq!(created.token_no, "1");

        let settings = store.get_settings().await.unwrap();
        assert_eq!(settings.next_form_number, 101);
        assert_eq!(settings.next_token_number, 2);
    }

    #[tokio::test]
    #[ignore = "requires database connection"]
    async fn test_search_and_order() {
        let store = test_store().await;
        store.create(new_candidate("Risha Khan")).await.unwrap();
        store.create(new_candidate("Zain Ali")).await.unwrap();

        let found = store.search("ALI").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Zain Ali");

        let all = store.list_all().await.unwrap();
        assert_eq!(all[0].name, "Zain Ali");
    }

    #[tokio::test]
    #[ignore = "requires database connection"]
    async fn test_delete_missing_returns_false() {
        let store = test_store().await;
        assert!(!store.delete(999).await.unwrap());
    }
}
