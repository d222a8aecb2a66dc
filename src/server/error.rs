use crate::core::error::InvalidReference;
use crate::server::status::{Envelope, code_to_message};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Central error type for the HTTP service
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    InvalidReference(#[from] InvalidReference),

    /// Outcome requested through the `return` parameter.
    #[error("Simulated {0} response")]
    Simulated(StatusCode),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Some(msg)),
            AppError::InvalidReference(err) => (StatusCode::BAD_REQUEST, Some(err.to_string())),
            AppError::Simulated(code) => (code, code_to_message(code).map(str::to_string)),
            AppError::InternalError(err) => {
                // Internal details stay in the log
                error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    code_to_message(StatusCode::INTERNAL_SERVER_ERROR).map(str::to_string),
                )
            }
        };

        (status, Json(Envelope::<()>::failure(status, message))).into_response()
    }
}
