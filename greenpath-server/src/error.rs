//! API error responses.
//!
//! Every failure maps to a `{error, code}` JSON body. Routing failures are
//! recovered before they reach this type (the comparison pipeline degrades
//! to synthetic routes), so the statuses here cover input validation and
//! the collaborators the server cannot substitute for.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use greenpath_core::Error as CoreError;

#[derive(Debug)]
pub enum ApiError {
    MissingInput(&'static str),
    InvalidInput(String),
    NoGeocodeMatch { input: String },
    Upstream { service: &'static str, status: u16 },
    /// A newer search started while this one was in flight; the stale
    /// result is discarded rather than allowed to overwrite newer state.
    Superseded,
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingInput(_) | ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NoGeocodeMatch { .. } => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Superseded => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::MissingInput(_) => "MissingInput",
            ApiError::InvalidInput(_) => "InvalidInput",
            ApiError::NoGeocodeMatch { .. } => "NoGeocodeMatch",
            ApiError::Upstream { .. } => "Error",
            ApiError::Superseded => "Superseded",
            ApiError::Internal(_) => "Internal",
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::MissingInput(what) => format!("Missing {what}"),
            ApiError::InvalidInput(msg) => msg.clone(),
            ApiError::NoGeocodeMatch { input } => format!(
                "Could not find \"{input}\". Try a simpler address (landmark + city) \
                 or coordinates in \"lat, lng\" format."
            ),
            ApiError::Upstream { service, .. } => format!("{service} request failed"),
            ApiError::Superseded => "Search superseded by a newer request".to_string(),
            ApiError::Internal(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.message(), "code": self.code() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MissingInput(what) => ApiError::MissingInput(what),
            CoreError::NoGeocodeMatch { input } => ApiError::NoGeocodeMatch { input },
            CoreError::UpstreamUnavailable { service, status } => {
                ApiError::Upstream { service, status }
            }
            CoreError::UnknownMode(_)
            | CoreError::InvalidCoordinate(_)
            | CoreError::InvalidWeights(_) => ApiError::InvalidInput(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map_or(502, |s| s.as_u16());
        tracing::warn!(error = %err, "collaborator request failed");
        ApiError::Upstream {
            service: "upstream",
            status,
        }
    }
}
