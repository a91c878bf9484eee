use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use axum::http::StatusCode;
use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorResponse {
    errors: Vec<String>,
}

/// Request malformation, the only error class this API surfaces. Storage
/// failures degrade individual rows to a null identifier instead.
#[derive(Debug)]
pub enum ApiError {
    /// The request body is absent or not a JSON object.
    NoJsonInput,
    /// The body is a JSON object but carries no usable `data` sequence.
    MalformedJsonInput,
}

impl ApiError {
    fn message(&self) -> &'static str {
        match self {
            ApiError::NoJsonInput => "No JSON Input Provided.",
            ApiError::MalformedJsonInput => "Bad Input. Malformed JSON Input.",
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("Rejected request: {}", self.message());
        let body = ErrorResponse { errors: vec![self.message().to_string()] };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
