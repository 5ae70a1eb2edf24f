use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rusqlite::ErrorCode;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("invalid parameters")]
    MissingParameter,

    #[error("invalid data")]
    InvalidData,

    #[error("some parts or all of data you sent conflict with stored data")]
    Conflict,

    #[error("internal error: {0:#}")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MissingParameter | ApiError::InvalidData => StatusCode::BAD_REQUEST,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text sent to the client. Internal details stay in the log.
    fn public_message(&self) -> String {
        match self {
            ApiError::Internal(_) => "internal error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Storage failures are internal unless SQLite rejected the write on a
/// constraint.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        let constraint = err.chain().any(|cause| {
            matches!(
                cause.downcast_ref::<rusqlite::Error>(),
                Some(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation
            )
        });
        if constraint {
            ApiError::Conflict
        } else {
            ApiError::Internal(err)
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(anyhow::Error::new(err).context("storage task failed"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Internal(err) = &self {
            error!("request failed: {err:#}");
        }
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("{}\n", self.public_message()),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn statuses_match_variants() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::MissingParameter.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidData.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let err = ApiError::Internal(anyhow::anyhow!("disk on fire"));
        assert_eq!(err.public_message(), "internal error");
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn constraint_violation_becomes_conflict() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY)").unwrap();
        conn.execute("INSERT INTO t (id) VALUES (1)", []).unwrap();
        let err = conn
            .execute("INSERT INTO t (id) VALUES (1)", [])
            .context("failed to insert")
            .unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Conflict));
    }

    #[test]
    fn other_storage_errors_are_internal() {
        let err = anyhow::anyhow!("no such table").context("failed to query");
        assert!(matches!(ApiError::from(err), ApiError::Internal(_)));
    }
}
