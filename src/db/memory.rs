use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::JobStore;
use crate::models::Job;
use crate::types::StoreError;

/// In-process `JobStore`. Contents live only as long as the process.
#[derive(Default)]
pub struct InMemoryJobStore {
    jobs: RwLock<Vec<Job>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn find(&self, skip: i64, limit: Option<i64>) -> Result<Vec<Job>, StoreError> {
        let jobs = self.jobs.read().await;
        let skip = usize::try_from(skip).unwrap_or(0);
        let limit = limit
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(usize::MAX);

        Ok(jobs.iter().skip(skip).take(limit).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        let jobs = self.jobs.read().await;
        Ok(jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn insert(&self, job: Job) -> Result<Job, StoreError> {
        self.jobs.write().await.push(job.clone());
        Ok(job)
    }

    async fn remove(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        let mut jobs = self.jobs.write().await;
        let index = jobs.iter().position(|j| j.id == id);
        Ok(index.map(|i| jobs.remove(i)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
