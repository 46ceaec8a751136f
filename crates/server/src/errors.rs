use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use models::errors::ModelError;
use service::errors::ServiceClientError;
use thiserror::Error;
use tracing::{error, warn};

use crate::views;

/// Errors a controller can end with; rendered as an HTML error page.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Remote(#[from] ServiceClientError),
    #[error("{0} not found")]
    NotFound(String),
    #[error(transparent)]
    InvalidInput(#[from] ModelError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, heading) = match &self {
            ApiError::Remote(e) => {
                error!(url = %e.url, status = ?e.status, error = %e, "moviecards-service call failed");
                (StatusCode::BAD_GATEWAY, "Movie catalogue unavailable")
            }
            ApiError::NotFound(what) => {
                warn!(%what, "record not found");
                (StatusCode::NOT_FOUND, "Not found")
            }
            ApiError::InvalidInput(e) => {
                warn!(field = e.field(), "request rejected");
                (StatusCode::BAD_REQUEST, "Invalid request")
            }
        };
        (status, Html(views::error_page(heading, &self.to_string()))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("runtime check failed: {0}")]
    Runtime(String),
}
