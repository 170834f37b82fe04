use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    pkg::{
        internal::{
            adaptors::jobs::spec::{JobApplication, JobPatch, NewJob},
            listing::{ListedJob, ListingQuery},
            screens::{self, ApplicationsView},
            session::require,
        },
        server::{middlewares::authn::CurrentSession, state::AppState},
    },
    prelude::Result,
};

// Extractor rejections are taken as values so the session check answers first
// and malformed input still gets the JSON error body.
type Parsed<T, E> = core::result::Result<T, E>;

pub async fn list(
    State(state): State<AppState>,
    session: CurrentSession,
    query: Parsed<Query<ListingQuery>, QueryRejection>,
) -> Result<Json<ApplicationsView>> {
    require(session.get())?;
    let Query(query) = query?;
    let view = screens::applications(session.get(), &*state.jobs, &query).await?;
    tracing::debug!("listing {} of {} jobs", view.jobs.len(), view.job_count);
    Ok(Json(view))
}

pub async fn create(
    State(state): State<AppState>,
    session: CurrentSession,
    input: Parsed<Json<NewJob>, JsonRejection>,
) -> Result<(StatusCode, Json<JobApplication>)> {
    require(session.get())?;
    let Json(input) = input?;
    let job = screens::add_job(session.get(), &*state.jobs, input).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    session: CurrentSession,
    id: Parsed<Path<Uuid>, PathRejection>,
) -> Result<Json<ListedJob>> {
    require(session.get())?;
    let Path(id) = id?;
    Ok(Json(screens::job_details(session.get(), &*state.jobs, id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    session: CurrentSession,
    id: Parsed<Path<Uuid>, PathRejection>,
    patch: Parsed<Json<JobPatch>, JsonRejection>,
) -> Result<Json<JobApplication>> {
    require(session.get())?;
    let Path(id) = id?;
    let Json(patch) = patch?;
    Ok(Json(screens::edit_job(session.get(), &*state.jobs, id, patch).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    session: CurrentSession,
    id: Parsed<Path<Uuid>, PathRejection>,
) -> Result<Json<Value>> {
    require(session.get())?;
    let Path(id) = id?;
    screens::delete_job(session.get(), &*state.jobs, id).await?;
    Ok(Json(json!({ "deleted": id })))
}
