//! Numbering settings stored as a named JSONB record.

use sqlx::types::Json;
use sqlx::{PgConnection, Postgres, Transaction};

use super::PgStore;
use crate::settings::model::{Allocation, Settings, SETTINGS_KEY};
use crate::store::StoreError;

impl PgStore {
    /// Read the settings, inserting the defaults on first access.
    pub async fn load_settings(&self) -> Result<Settings, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        insert_default(&mut conn).await?;

        let (Json(settings),): (Json<Settings>,) =
            sqlx::query_as("SELECT value FROM app_settings WHERE key = $1")
                .bind(SETTINGS_KEY)
                .fetch_one(&mut *conn)
                .await?;
        Ok(settings)
    }

    pub async fn save_settings(&self, settings: &Settings) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO app_settings (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(SETTINGS_KEY)
        .bind(Json(settings))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

async fn insert_default(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO app_settings (key, value) VALUES ($1, $2) ON CONFLICT (key) DO NOTHING")
        .bind(SETTINGS_KEY)
        .bind(Json(Settings::default()))
        .execute(conn)
        .await?;
    Ok(())
}

/// Advance the counters inside `tx`.
///
/// The settings row stays locked (`FOR UPDATE`) until the transaction ends,
/// so concurrent allocations are serialized by the database.
pub(super) async fn allocate_in(
    tx: &mut Transaction<'_, Postgres>,
) -> Result<Allocation, StoreError> {
    insert_default(&mut **tx).await?;

    let (Json(mut settings),): (Json<Settings>,) =
        sqlx::query_as("SELECT value FROM app_settings WHERE key = $1 FOR UPDATE")
            .bind(SETTINGS_KEY)
            .fetch_one(&mut **tx)
            .await?;

    let allocation = settings.allocate().ok_or(StoreError::CounterOverflow)?;

    sqlx::query("UPDATE app_settings SET value = $2 WHERE key = $1")
        .bind(SETTINGS_KEY)
        .bind(Json(settings))
        .execute(&mut **tx)
        .await?;

    Ok(allocation)
}
