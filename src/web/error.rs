//! Mapping of service errors onto HTTP responses

use crate::photos::PhotoError;
use crate::search::SearchError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// JSON error body: `{"error": "...", "details": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = match &self {
            SearchError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            SearchError::Configuration => {
                tracing::error!("Provider API key is not configured");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            SearchError::Provider(e) => {
                tracing::error!(error = %e, "provider request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        ErrorBody::new(self.to_string()).into_response_with(status)
    }
}

impl IntoResponse for PhotoError {
    fn into_response(self) -> Response {
        match self {
            PhotoError::MissingReference | PhotoError::InvalidReference => {
                ErrorBody::new(self.to_string()).into_response_with(StatusCode::BAD_REQUEST)
            }
            PhotoError::Configuration => {
                tracing::error!("Provider API key is not configured");
                ErrorBody::new(self.to_string())
                    .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
            }
            PhotoError::Transport(ref e) => {
                tracing::error!(error = %e, "error fetching photo");
                ErrorBody::new(self.to_string())
                    .with_details(e.to_string())
                    .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
            }
            PhotoError::Provider { ref details, .. } => ErrorBody::new(self.to_string())
                .with_details(details.clone())
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}
