use chrono::{DateTime, Timelike, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use super::{
    adaptors::jobs::spec::{JobApplication, JobPatch, NewJob},
    listing::{ListedJob, ListingQuery},
    session::{Session, User, require},
    stats::{DashboardStats, RECENT_ACTIVITY_LEN},
    store::JobStore,
};
use crate::prelude::{Error, Result};

/// A screen's in-memory copy of the caller's jobs, in store order.
#[derive(Debug, Clone, Default)]
pub struct JobBoard {
    pub jobs: Vec<JobApplication>,
}

impl JobBoard {
    pub async fn load(session: Option<&Session>, store: &dyn JobStore) -> Result<Self> {
        let session = require(session)?;
        let jobs = store.list(session.owner_id()).await?;
        Ok(JobBoard { jobs })
    }

    /// Drops the record locally once the store confirms the delete.
    pub async fn delete(
        &mut self,
        session: Option<&Session>,
        store: &dyn JobStore,
        id: Uuid,
    ) -> Result<()> {
        delete_job(session, store, id).await?;
        self.jobs.retain(|job| job.id != id);
        Ok(())
    }

    pub fn stats(&self, now: DateTime<Utc>) -> DashboardStats {
        DashboardStats::compute(&self.jobs, now)
    }
}

pub fn greeting(user: Option<&User>, hour: u32) -> String {
    let Some(user) = user else {
        return "Welcome back!".to_string();
    };
    let time_greeting = if hour < 12 {
        "Good morning"
    } else if hour < 17 {
        "Good afternoon"
    } else {
        "Good evening"
    };
    format!("{}, {}!", time_greeting, user.display_name())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub greeting: String,
    pub job_count: usize,
    pub is_empty: bool,
    pub show_view_all: bool,
    pub stats: DashboardStats,
}

pub async fn dashboard(
    session: Option<&Session>,
    store: &dyn JobStore,
    now: DateTime<Utc>,
) -> Result<DashboardView> {
    let board = JobBoard::load(session, store).await?;
    let job_count = board.jobs.len();
    Ok(DashboardView {
        greeting: greeting(session.map(|s| &s.user), now.hour()),
        job_count,
        is_empty: job_count == 0,
        show_view_all: job_count > RECENT_ACTIVITY_LEN,
        stats: board.stats(now),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationsView {
    pub job_count: usize,
    pub headline: Option<String>,
    pub empty_message: Option<&'static str>,
    pub jobs: Vec<ListedJob>,
}

pub async fn applications(
    session: Option<&Session>,
    store: &dyn JobStore,
    query: &ListingQuery,
) -> Result<ApplicationsView> {
    let board = JobBoard::load(session, store).await?;
    let jobs: Vec<ListedJob> = query
        .apply(&board.jobs)
        .into_iter()
        .map(ListedJob::from)
        .collect();
    Ok(ApplicationsView {
        job_count: board.jobs.len(),
        headline: query.headline(),
        empty_message: jobs.is_empty().then(|| query.empty_message()),
        jobs,
    })
}

pub async fn job_details(
    session: Option<&Session>,
    store: &dyn JobStore,
    id: Uuid,
) -> Result<ListedJob> {
    let session = require(session)?;
    store
        .get(session.owner_id(), id)
        .await?
        .map(ListedJob::from)
        .ok_or(Error::NotFound("job"))
}

pub async fn add_job(
    session: Option<&Session>,
    store: &dyn JobStore,
    input: NewJob,
) -> Result<JobApplication> {
    let session = require(session)?;
    let input = input.normalized();
    input.validate()?;
    store.insert(session.owner_id(), input).await
}

pub async fn edit_job(
    session: Option<&Session>,
    store: &dyn JobStore,
    id: Uuid,
    patch: JobPatch,
) -> Result<JobApplication> {
    let session = require(session)?;
    let patch = patch.normalized();
    patch.validate()?;
    store
        .update(session.owner_id(), id, patch)
        .await?
        .ok_or(Error::NotFound("job"))
}

pub async fn delete_job(session: Option<&Session>, store: &dyn JobStore, id: Uuid) -> Result<()> {
    let session = require(session)?;
    if store.delete(session.owner_id(), id).await? {
        Ok(())
    } else {
        Err(Error::NotFound("job"))
    }
}
