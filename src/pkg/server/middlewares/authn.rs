use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::pkg::{internal::session::Session, server::state::AppState};

pub const TOKEN_COOKIE: &str = "_Host_token";

fn token_from(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(TOKEN_COOKIE).filter(|c| !c.value().is_empty()) {
        return Some(cookie.value().to_string());
    }
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolves the caller's session, if any. Handlers decide whether one is required.
pub async fn resolve_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = token_from(&headers) {
        match Session::lookup(&state.db_pool, &token).await {
            Ok(Some(session)) => {
                tracing::debug!("authenticated {}", &session.user.email);
                request.extensions_mut().insert(Arc::new(session));
            }
            Ok(None) => tracing::warn!("unknown or expired token"),
            Err(e) => {
                tracing::warn!("session lookup failed: {}", e);
                return e.into_response();
            }
        }
    }
    next.run(request).await
}

/// The session resolved by [`resolve_session`], passed on to screen operations.
pub struct CurrentSession(pub Option<Arc<Session>>);

impl CurrentSession {
    pub fn get(&self) -> Option<&Session> {
        self.0.as_deref()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> core::result::Result<Self, Self::Rejection> {
        Ok(CurrentSession(parts.extensions.get::<Arc<Session>>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_token_from_cookie_then_bearer() {
        let mut headers = HeaderMap::new();
        assert_eq!(token_from(&headers), None);
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(token_from(&headers).as_deref(), Some("abc"));
        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_static("_Host_token=xyz; theme=dark"),
        );
        assert_eq!(token_from(&headers).as_deref(), Some("xyz"));
    }

    #[test]
    fn test_blank_bearer_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer  "));
        assert_eq!(token_from(&headers), None);
    }
}
