use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{Resume, StoredResume};
use crate::store::ResumeStore;

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryResumeStore {
    // Vec keeps creation order for `list_for_user`.
    resumes: RwLock<Vec<StoredResume>>,
}

impl MemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn create(&self, user_id: Uuid, document: Resume) -> Result<StoredResume, AppError> {
        let now = Utc::now();
        let stored = StoredResume {
            id: Uuid::new_v4(),
            user_id,
            document,
            created_at: now,
            updated_at: now,
        };
        self.resumes.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<StoredResume>, AppError> {
        Ok(self
            .resumes
            .read()
            .await
            .iter()
            .find(|r| r.id == id && r.user_id == user_id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<StoredResume>, AppError> {
        Ok(self
            .resumes
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        document: Resume,
    ) -> Result<Option<StoredResume>, AppError> {
        let mut resumes = self.resumes.write().await;
        let Some(existing) = resumes
            .iter_mut()
            .find(|r| r.id == id && r.user_id == user_id)
        else {
            return Ok(None);
        };
        existing.document = document;
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut resumes = self.resumes.write().await;
        let before = resumes.len();
        resumes.retain(|r| !(r.id == id && r.user_id == user_id));
        Ok(resumes.len() < before)
    }
}
