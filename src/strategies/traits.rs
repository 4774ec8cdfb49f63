//! Strategy traits and types

use crate::config::{ProviderSettings, StrategyKind};
use crate::places::{PlaceRecord, PlacesResponse};
use crate::search::{ProviderError, SearchQuery};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Header carrying the provider credential
pub const API_KEY_HEADER: &str = "X-Goog-Api-Key";

/// Header limiting which attributes the provider returns
pub const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";

/// Parameters for building a provider request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestParams {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
    pub language_code: String,
    pub max_result_count: u32,
    /// Provider base URL, without a trailing slash
    pub base_url: String,
}

impl RequestParams {
    /// Combine a search query with the provider settings
    pub fn new(query: &SearchQuery, provider: &ProviderSettings) -> Self {
        Self {
            latitude: query.latitude,
            longitude: query.longitude,
            radius_meters: query.radius_meters,
            language_code: provider.language_code.clone(),
            max_result_count: provider.max_result_count,
            base_url: provider.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Endpoint URL for a provider method such as `places:searchText`
    pub fn endpoint(&self, method: &str) -> Result<String, ProviderError> {
        endpoint_url(&self.base_url, method)
    }

    /// The search circle in the provider's JSON shape
    pub fn circle(&self) -> serde_json::Value {
        serde_json::json!({
            "circle": {
                "center": {
                    "latitude": self.latitude,
                    "longitude": self.longitude,
                },
                "radius": self.radius_meters,
            }
        })
    }
}

/// Join a provider base URL and method, checking the result is a URL
pub fn endpoint_url(base_url: &str, method: &str) -> Result<String, ProviderError> {
    let base_url = base_url.trim_end_matches('/');
    let raw = format!("{}/{}", base_url, method);
    url::Url::parse(&raw)
        .map(|_| raw)
        .map_err(|e| ProviderError::InvalidRequest(format!("{}: {}", base_url, e)))
}

/// HTTP request to be made to the provider
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// URL to request
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: HashMap<String, String>,
    /// JSON body
    pub body: Option<serde_json::Value>,
}

impl ProviderRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::with_method(url, HttpMethod::Get)
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self::with_method(url, HttpMethod::Post)
    }

    fn with_method(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: HashMap::new(),
            params: HashMap::new(),
            body: None,
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add JSON body
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach the credential and field mask headers
    pub fn authorize(self, api_key: &str, field_mask: &str) -> Self {
        self.header(API_KEY_HEADER, api_key)
            .header(FIELD_MASK_HEADER, field_mask)
    }
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// HTTP response from the provider
#[derive(Debug)]
pub struct ProviderResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers, lowercased names
    pub headers: HashMap<String, String>,
    /// Raw response body
    pub body: Vec<u8>,
    /// Response URL (after redirects)
    pub url: String,
}

impl ProviderResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, ProviderError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Body as text, lossily decoded
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(String::as_str)
    }

    /// Turn a non-success response into an error carrying its body
    pub fn error_for_status(self) -> Result<Self, ProviderError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ProviderError::Status {
                status: self.status,
                body: self.text(),
            })
        }
    }
}

/// The two request templates a strategy can use
pub type QueryKind = StrategyKind;

/// One named way of asking the provider for comic book stores
pub trait Strategy: Send + Sync {
    /// Strategy name, reported in results
    fn name(&self) -> &str;

    /// Which request template this strategy uses
    fn kind(&self) -> QueryKind;

    /// Build the HTTP request for a search
    fn request(&self, params: &RequestParams) -> Result<ProviderRequest, ProviderError>;

    /// Parse the HTTP response into normalized records
    fn response(&self, response: ProviderResponse) -> Result<Vec<PlaceRecord>, ProviderError> {
        let response = response.error_for_status()?;
        if response.body.is_empty() {
            return Ok(vec![]);
        }
        let places: PlacesResponse = response.json()?;
        Ok(places.into_records())
    }
}
