use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("authentication required")]
    Unauthenticated,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("improperly configured: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Header(#[from] axum::http::header::InvalidHeaderValue),

    #[error("{}", .0.body_text())]
    Body(#[from] JsonRejection),

    #[error("{}", .0.body_text())]
    Path(#[from] PathRejection),

    #[error("{}", .0.body_text())]
    Query(#[from] QueryRejection),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::Unauthenticated => "ERR-AUTH-001",
            Error::NotFound(_) => "ERR-JOB-404",
            Error::Validation(_) => "ERR-JOB-422",
            Error::Database(_) | Error::Migrate(_) => "ERR-DB-000",
            Error::Config(_) => "ERR-CONF-000",
            Error::Io(_) | Error::Header(_) => "ERR-IO-000",
            Error::Body(_) | Error::Path(_) | Error::Query(_) => "ERR-REQ-400",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Error::Unauthenticated => StatusCode::UNAUTHORIZED,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Body(rejection) => rejection.status(),
            Error::Path(rejection) => rejection.status(),
            Error::Query(rejection) => rejection.status(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        // store and config failures stay in the logs, clients get a generic detail
        let detail = if status.is_server_error() {
            tracing::error!("{}: {}", self.code(), &self);
            "something went wrong, please try again".to_string()
        } else {
            self.to_string()
        };
        (
            status,
            Json(json!({
                "code": self.code(),
                "detail": detail,
            })),
        )
            .into_response()
    }
}
