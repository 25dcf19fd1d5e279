use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};

use crate::error::AppError;

/// Body returned by every endpoint: a success flag, the payload, and a message on failure.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub flag: bool,
    pub data: Option<T>,
    pub error_msg: Option<String>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            flag: true,
            data: Some(data),
            error_msg: None,
            status: StatusCode::OK,
        }
    }

    pub fn fail(err: AppError, failure: &str) -> Self {
        let status = err.status();
        let message = match &err {
            AppError::Database(e) => {
                error!("{}: database error: {}", failure, e);
                failure.to_string()
            }
            AppError::WriteRejected(reason) => {
                error!("{}: write rejected: {}", failure, reason);
                failure.to_string()
            }
            other => {
                warn!("{}: {}", failure, other);
                format!("{}: {}", failure, other)
            }
        };

        Self {
            flag: false,
            data: None,
            error_msg: Some(message),
            status,
        }
    }

    /// Folds a service result into an envelope. `failure` names the operation for the caller.
    pub fn from_result(result: Result<T, AppError>, failure: &str) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::fail(err, failure),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}
