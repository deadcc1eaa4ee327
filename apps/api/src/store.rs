//! Résumé persistence boundary.
//!
//! Exports only ever read; the trait is the whole contract the engine has
//! with storage. Production uses [`PgResumeStore`] over a JSONB column.

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, ResumeRow};

/// A résumé as fetched for one export call. The document is borrowed
/// read-only downstream; nothing here is written back.
#[derive(Debug, Clone)]
pub struct StoredResume {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub document: ResumeDocument,
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<StoredResume>, AppError>;
}

pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn get(&self, id: Uuid) -> Result<Option<StoredResume>, AppError> {
        let row: Option<ResumeRow> = sqlx::query_as(
            "SELECT id, user_id, data, created_at, updated_at FROM resumes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            let document: ResumeDocument = serde_json::from_value(row.data).map_err(|e| {
                AppError::Internal(anyhow!("resume {id} has malformed document data: {e}"))
            })?;
            Ok(StoredResume {
                id: row.id,
                owner_id: row.user_id,
                document,
            })
        })
        .transpose()
    }
}
