use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    pkg::internal::adaptors::jobs::spec::{JOB_COLUMNS, JobApplication},
    prelude::Result,
};

pub struct JobSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobSelector { pool }
    }

    pub async fn get_by_id(&mut self, owner_id: &str, id: Uuid) -> Result<Option<JobApplication>> {
        let row = sqlx::query_as::<_, JobApplication>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1 AND owner_id = $2"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_all(&mut self, owner_id: &str) -> Result<Vec<JobApplication>> {
        let rows = sqlx::query_as::<_, JobApplication>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
