use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use arcade_common::SubmissionError;
use thiserror::Error;
use tracing::error;

use crate::db::LedgerError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    InvalidSubmission(#[from] SubmissionError),

    #[error("{}", ledger_message(.0))]
    Storage(#[from] LedgerError),

    #[error("Not found")]
    NotFound,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

fn ledger_message(err: &LedgerError) -> &'static str {
    match err {
        LedgerError::StorageUnavailable(_) => "Storage unavailable",
        LedgerError::UnreadableRow(_) => "Unreadable score record",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidSubmission(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(e) => {
                error!("Ledger error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Internal(e) => {
                error!("API error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(serde_json::json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
