//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use voicehome_domain::error::{HomeError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`HomeError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(HomeError);

impl From<HomeError> for ApiError {
    fn from(err: HomeError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(HomeError::Validation(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let HomeError::Validation(err) = &self.0;
        let status = match err {
            ValidationError::UnknownRoom(_) => StatusCode::NOT_FOUND,
            ValidationError::InvalidColor(_) => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(ErrorBody {
                error: err.to_string(),
            }),
        )
            .into_response()
    }
}
