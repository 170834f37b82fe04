use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    pkg::{
        internal::adaptors::jobs::{
            mutators::JobMutator,
            selectors::JobSelector,
            spec::{JobApplication, JobPatch, NewJob},
        },
        server::state::GetTxn,
    },
    prelude::Result,
};

/// Per-owner record store for job applications.
#[async_trait::async_trait]
pub trait JobStore: Send + Sync {
    /// All of the owner's records, newest `created_at` first.
    async fn list(&self, owner_id: &str) -> Result<Vec<JobApplication>>;

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<Option<JobApplication>>;

    async fn insert(&self, owner_id: &str, job: NewJob) -> Result<JobApplication>;

    async fn update(
        &self,
        owner_id: &str,
        id: Uuid,
        patch: JobPatch,
    ) -> Result<Option<JobApplication>>;

    /// `false` when no record with that id belongs to the owner.
    async fn delete(&self, owner_id: &str, id: Uuid) -> Result<bool>;
}

#[derive(Debug, Clone)]
pub struct PgJobStore {
    pool: Arc<PgPool>,
}

impl PgJobStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        PgJobStore { pool }
    }
}

#[async_trait::async_trait]
impl JobStore for PgJobStore {
    async fn list(&self, owner_id: &str) -> Result<Vec<JobApplication>> {
        let mut conn = self.pool.acquire().await?;
        let jobs = JobSelector::new(&mut conn).get_all(owner_id).await?;
        tracing::debug!("loaded {} jobs for {}", jobs.len(), owner_id);
        Ok(jobs)
    }

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<Option<JobApplication>> {
        let mut conn = self.pool.acquire().await?;
        JobSelector::new(&mut conn).get_by_id(owner_id, id).await
    }

    async fn insert(&self, owner_id: &str, job: NewJob) -> Result<JobApplication> {
        let mut tx = self.pool.begin_txn().await?;
        let job = JobMutator::new(&mut tx).create(owner_id, job).await?;
        tx.commit().await?;
        tracing::info!("created job {} for {}", job.id, owner_id);
        Ok(job)
    }

    async fn update(
        &self,
        owner_id: &str,
        id: Uuid,
        patch: JobPatch,
    ) -> Result<Option<JobApplication>> {
        let mut tx = self.pool.begin_txn().await?;
        let job = JobMutator::new(&mut tx).update(owner_id, id, patch).await?;
        tx.commit().await?;
        tracing::debug!("updated job {}: found={}", id, job.is_some());
        Ok(job)
    }

    async fn delete(&self, owner_id: &str, id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin_txn().await?;
        let deleted = JobMutator::new(&mut tx).delete(owner_id, id).await?;
        tx.commit().await?;
        tracing::info!("deleted job {}: found={}", id, deleted);
        Ok(deleted)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::sync::Mutex;

    use chrono::Utc;
    use uuid::Uuid;

    use super::JobStore;
    use crate::{
        pkg::internal::adaptors::jobs::spec::{JobApplication, JobPatch, NewJob},
        prelude::Result,
    };

    /// Vec-backed store; `rows` is kept newest first.
    #[derive(Default)]
    pub struct MemoryJobStore {
        rows: Mutex<Vec<JobApplication>>,
    }

    impl MemoryJobStore {
        pub fn with_rows(mut rows: Vec<JobApplication>) -> Self {
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            MemoryJobStore {
                rows: Mutex::new(rows),
            }
        }

        pub fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl JobStore for MemoryJobStore {
        async fn list(&self, owner_id: &str) -> Result<Vec<JobApplication>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().filter(|j| j.owner_id == owner_id).cloned().collect())
        }

        async fn get(&self, owner_id: &str, id: Uuid) -> Result<Option<JobApplication>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .find(|j| j.id == id && j.owner_id == owner_id)
                .cloned())
        }

        async fn insert(&self, owner_id: &str, job: NewJob) -> Result<JobApplication> {
            let row = JobApplication {
                id: Uuid::new_v4(),
                owner_id: owner_id.to_string(),
                company: job.company,
                title: job.title,
                status: job.status,
                location: job.location,
                salary: job.salary,
                url: job.url,
                notes: job.notes,
                applied_date: job.applied_date,
                deadline: job.deadline,
                reminder_date: job.reminder_date,
                tags: job.tags,
                created_at: Utc::now(),
            };
            self.rows.lock().unwrap().insert(0, row.clone());
            Ok(row)
        }

        async fn update(
            &self,
            owner_id: &str,
            id: Uuid,
            patch: JobPatch,
        ) -> Result<Option<JobApplication>> {
            let mut rows = self.rows.lock().unwrap();
            Ok(rows
                .iter_mut()
                .find(|j| j.id == id && j.owner_id == owner_id)
                .map(|job| {
                    patch.apply_to(job);
                    job.clone()
                }))
        }

        async fn delete(&self, owner_id: &str, id: Uuid) -> Result<bool> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|j| !(j.id == id && j.owner_id == owner_id));
            Ok(rows.len() < before)
        }
    }
}
