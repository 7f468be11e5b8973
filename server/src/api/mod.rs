pub mod auth;
pub mod error;
pub mod games;
pub mod scores;
pub mod session;

use axum::{
    body::Body,
    extract::Request,
    response::{IntoResponse, Response},
};
use std::path::PathBuf;
use tower::ServiceExt;
use tower_http::services::ServeFile;

pub use error::ApiError;

/// Serves a single file from disk, answering 404 when it is missing.
pub(crate) async fn serve_file(path: PathBuf) -> Response {
    match ServeFile::new(path).oneshot(Request::new(Body::empty())).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
