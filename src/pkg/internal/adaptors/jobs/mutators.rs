use sqlx::{PgConnection, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    pkg::internal::adaptors::jobs::{
        selectors::JobSelector,
        spec::{JOB_COLUMNS, JobApplication, JobPatch, NewJob},
    },
    prelude::Result,
};

pub struct JobMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobMutator { pool }
    }

    pub async fn create(&mut self, owner_id: &str, job: NewJob) -> Result<JobApplication> {
        let row = sqlx::query_as::<_, JobApplication>(&format!(
            r#"
            INSERT INTO jobs (owner_id, company, title, status, location, salary, url, notes,
                              applied_date, deadline, reminder_date, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(&job.company)
        .bind(&job.title)
        .bind(&job.status)
        .bind(&job.location)
        .bind(&job.salary)
        .bind(&job.url)
        .bind(&job.notes)
        .bind(job.applied_date)
        .bind(job.deadline)
        .bind(job.reminder_date)
        .bind(&job.tags)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        &mut self,
        owner_id: &str,
        id: Uuid,
        job: JobPatch,
    ) -> Result<Option<JobApplication>> {
        if job.is_empty() {
            return JobSelector::new(&mut *self.pool).get_by_id(owner_id, id).await;
        }

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE jobs SET ");
        let mut set = qb.separated(", ");
        if let Some(company) = job.company {
            set.push("company = ").push_bind_unseparated(company);
        }
        if let Some(title) = job.title {
            set.push("title = ").push_bind_unseparated(title);
        }
        if let Some(status) = job.status {
            set.push("status = ").push_bind_unseparated(status);
        }
        if let Some(location) = job.location {
            set.push("location = ").push_bind_unseparated(location);
        }
        if let Some(salary) = job.salary {
            set.push("salary = ").push_bind_unseparated(salary);
        }
        if let Some(url) = job.url {
            set.push("url = ").push_bind_unseparated(url);
        }
        if let Some(notes) = job.notes {
            set.push("notes = ").push_bind_unseparated(notes);
        }
        if let Some(applied_date) = job.applied_date {
            set.push("applied_date = ").push_bind_unseparated(applied_date);
        }
        if let Some(deadline) = job.deadline {
            set.push("deadline = ").push_bind_unseparated(deadline);
        }
        if let Some(reminder_date) = job.reminder_date {
            set.push("reminder_date = ").push_bind_unseparated(reminder_date);
        }
        if let Some(tags) = job.tags {
            set.push("tags = ").push_bind_unseparated(tags);
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(" AND owner_id = ")
            .push_bind(owner_id)
            .push(format!(" RETURNING {JOB_COLUMNS}"));

        let row = qb
            .build_query_as::<JobApplication>()
            .fetch_optional(&mut *self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, owner_id: &str, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&mut *self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
