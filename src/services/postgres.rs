use crate::models::Breed;
use crate::services::catalog::CatalogError;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;

/// PostgreSQL-backed breed catalog
///
/// Breeds live in a single `breeds` table as JSONB documents keyed by name,
/// so partial or evolving records need no schema change.
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    /// Connect and run pending migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, CatalogError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, CatalogError> {
        tracing::info!("Connecting to PostgreSQL breed catalog");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Every breed, ordered by name
    ///
    /// Rows whose document no longer parses are skipped with a warning.
    pub async fn load_all(&self) -> Result<Vec<Breed>, CatalogError> {
        let query = r#"
            SELECT name, document
            FROM breeds
            ORDER BY name
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let breeds: Vec<Breed> = rows
            .iter()
            .filter_map(|row| match row.try_get::<Json<Breed>, _>("document") {
                Ok(Json(breed)) => Some(breed),
                Err(e) => {
                    let name: String = row.try_get("name").unwrap_or_default();
                    tracing::warn!("Skipping unreadable breed document {}: {}", name, e);
                    None
                }
            })
            .collect();

        tracing::debug!("Loaded {} breeds from PostgreSQL", breeds.len());

        Ok(breeds)
    }

    /// Insert or replace breed documents
    ///
    /// Returns the number of rows written.
    pub async fn upsert_breeds(&self, breeds: &[Breed]) -> Result<u64, CatalogError> {
        let query = r#"
            INSERT INTO breeds (name, name_lower, document, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (name)
            DO UPDATE SET
                name_lower = EXCLUDED.name_lower,
                document = EXCLUDED.document,
                updated_at = EXCLUDED.updated_at
        "#;

        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for breed in breeds {
            let result = sqlx::query(query)
                .bind(&breed.name)
                .bind(breed.name.to_lowercase())
                .bind(Json(breed))
                .execute(&mut *tx)
                .await?;
            written += result.rows_affected();
        }

        tx.commit().await?;

        tracing::info!("Upserted {} breeds into PostgreSQL", written);

        Ok(written)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, CatalogError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
