//! HTTP request handlers

use super::error::ErrorBody;
use super::state::AppState;
use crate::photos::CACHE_CONTROL;
use crate::search::{SearchError, SearchQuery};
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

/// Query parameters for a store search
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Latitude
    pub lat: Option<String>,
    /// Longitude
    pub lng: Option<String>,
    /// Radius in meters
    pub radius: Option<String>,
}

/// JSON body for a store search; values may be numbers or strings
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchBody {
    pub lat: Option<serde_json::Value>,
    pub lng: Option<serde_json::Value>,
    pub radius: Option<serde_json::Value>,
}

impl From<SearchBody> for SearchParams {
    fn from(body: SearchBody) -> Self {
        Self {
            lat: body.lat.and_then(value_text),
            lng: body.lng.and_then(value_text),
            radius: body.radius.and_then(value_text),
        }
    }
}

fn value_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }
}

/// Store search from query parameters
pub async fn find_stores(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    match params {
        Ok(Query(params)) => run_search(&state, params).await,
        Err(rejection) => SearchError::InvalidArgument(rejection.body_text()).into_response(),
    }
}

/// Store search from a JSON body. A body that is not a JSON object is
/// treated as carrying no coordinates.
pub async fn find_stores_json(State(state): State<AppState>, body: Bytes) -> Response {
    let body: SearchBody = serde_json::from_slice(&body).unwrap_or_default();
    run_search(&state, body.into()).await
}

async fn run_search(state: &AppState, params: SearchParams) -> Response {
    let query = match SearchQuery::from_raw(
        params.lat.as_deref(),
        params.lng.as_deref(),
        params.radius.as_deref(),
        &state.settings.search,
    ) {
        Ok(query) => query,
        Err(e) => return e.into_response(),
    };

    match state.search.execute(&query).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Query parameters for the photo proxy
#[derive(Debug, Deserialize)]
pub struct PhotoParams {
    pub photoreference: Option<String>,
}

/// Photo proxy handler
pub async fn get_photo(
    State(state): State<AppState>,
    params: Result<Query<PhotoParams>, QueryRejection>,
) -> Response {
    let reference = match params {
        Ok(Query(params)) => params.photoreference.unwrap_or_default(),
        Err(rejection) => {
            return ErrorBody::new(rejection.body_text())
                .into_response_with(StatusCode::BAD_REQUEST)
        }
    };

    match state.photos.fetch(&reference).await {
        Ok(photo) => (
            [
                (header::CONTENT_TYPE, photo.content_type),
                (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
            ],
            photo.bytes,
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Provider connectivity check
pub async fn test_api(State(state): State<AppState>) -> Response {
    match state.search.probe().await {
        Ok(report) => {
            let status = StatusCode::from_u16(report.status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Json(report)).into_response()
        }
        Err(SearchError::Provider(e)) => {
            tracing::error!(error = %e, "provider probe failed");
            ErrorBody::new("Test failed")
                .with_details(e.to_string())
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(e) => e.into_response(),
    }
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
