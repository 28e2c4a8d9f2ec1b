//! Résumé persistence — pluggable, trait-based store.
//!
//! `AppState` holds an `Arc<dyn ResumeStore>`: `PgResumeStore` when
//! `DATABASE_URL` is set, `MemoryResumeStore` otherwise (and in tests).
//!
//! Every lookup is scoped by `user_id`. A resume owned by someone else is
//! indistinguishable from a missing one.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{Resume, StoredResume};

pub use memory::MemoryResumeStore;
pub use postgres::PgResumeStore;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn create(&self, user_id: Uuid, document: Resume) -> Result<StoredResume, AppError>;

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<StoredResume>, AppError>;

    /// All of a user's resumes, oldest first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<StoredResume>, AppError>;

    /// Replaces the whole document and bumps `updated_at`.
    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        document: Resume,
    ) -> Result<Option<StoredResume>, AppError>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError>;
}
