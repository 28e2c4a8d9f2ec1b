use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{Resume, StoredResume};
use crate::store::ResumeStore;

#[derive(Debug, FromRow)]
struct ResumeDocumentRow {
    id: Uuid,
    user_id: Uuid,
    document: Json<Resume>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ResumeDocumentRow> for StoredResume {
    fn from(row: ResumeDocumentRow) -> Self {
        StoredResume {
            id: row.id,
            user_id: row.user_id,
            document: row.document.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Postgres-backed store. The whole document lives in one JSONB column;
/// JSON arrays keep their order, so section and bullet order survive.
#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url` and makes sure the table exists.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("failed to connect to PostgreSQL")?;
        info!("PostgreSQL connection pool established");

        let store = Self::new(pool);
        store
            .ensure_schema()
            .await
            .context("failed to create resume_documents schema")?;
        Ok(store)
    }

    /// Creates the `resume_documents` table and index if missing.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS resume_documents (
                id          UUID PRIMARY KEY,
                user_id     UUID NOT NULL,
                document    JSONB NOT NULL,
                created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS resume_documents_user_idx ON resume_documents (user_id, created_at)",
        )
        .execute(&self.pool)
        .await?;

        info!("resume_documents schema ready");
        Ok(())
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn create(&self, user_id: Uuid, document: Resume) -> Result<StoredResume, AppError> {
        let row: ResumeDocumentRow = sqlx::query_as(
            r#"
            INSERT INTO resume_documents (id, user_id, document)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, document, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(Json(&document))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<StoredResume>, AppError> {
        let row: Option<ResumeDocumentRow> = sqlx::query_as(
            "SELECT id, user_id, document, created_at, updated_at FROM resume_documents WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<StoredResume>, AppError> {
        let rows: Vec<ResumeDocumentRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, document, created_at, updated_at
            FROM resume_documents
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        document: Resume,
    ) -> Result<Option<StoredResume>, AppError> {
        let row: Option<ResumeDocumentRow> = sqlx::query_as(
            r#"
            UPDATE resume_documents
            SET document = $1, updated_at = now()
            WHERE id = $2 AND user_id = $3
            RETURNING id, user_id, document, created_at, updated_at
            "#,
        )
        .bind(Json(&document))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resume_documents WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
