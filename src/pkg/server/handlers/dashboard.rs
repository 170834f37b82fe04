use axum::{Json, extract::State};
use chrono::Utc;

use crate::{
    pkg::{
        internal::screens::{self, DashboardView},
        server::{middlewares::authn::CurrentSession, state::AppState},
    },
    prelude::{Error, Result},
};

pub async fn show(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<DashboardView>> {
    Ok(Json(screens::dashboard(session.get(), &*state.jobs, Utc::now()).await?))
}

pub async fn not_found() -> Error {
    Error::NotFound("page")
}
