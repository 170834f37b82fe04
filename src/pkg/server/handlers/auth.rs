use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, header::SET_COOKIE},
};
use serde_json::{Value, json};

use crate::{
    pkg::{
        internal::session::require,
        server::{
            middlewares::authn::{CurrentSession, TOKEN_COOKIE},
            state::AppState,
        },
    },
    prelude::Result,
};

pub async fn logout(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<(HeaderMap, Json<Value>)> {
    let session = require(session.get())?;
    session.revoke(&state.db_pool).await?;
    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        HeaderValue::from_str(&format!("{}=; Max-Age=0; Path=/; HttpOnly", TOKEN_COOKIE))?,
    );
    Ok((headers, Json(json!({ "loggedOut": true }))))
}
