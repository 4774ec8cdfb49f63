//! Place photo proxy
//!
//! Resolves the photo reference carried by a place record into image bytes
//! from the provider's media endpoint, so the browser never needs the API
//! key. A failed photo is not fatal to a search; the client shows a
//! placeholder instead.

use crate::config::ProviderSettings;
use crate::network::HttpClient;
use crate::strategies::{ProviderRequest, API_KEY_HEADER};
use thiserror::Error;
use tracing::{debug, warn};

/// Content type assumed when the provider does not send one
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// `Cache-Control` value for proxied photos: one day
pub const CACHE_CONTROL: &str = "public, max-age=86400";

/// Errors from resolving a photo reference
#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("Photo reference is required.")]
    MissingReference,

    #[error("Invalid photo reference.")]
    InvalidReference,

    #[error("Server configuration error. API key not found.")]
    Configuration,

    /// Network or TLS failure from the underlying HTTP client
    #[error("Error fetching photo.")]
    Transport(#[from] reqwest::Error),

    /// The media endpoint answered with a non-success status
    #[error("Failed to fetch photo: {status}")]
    Provider { status: u16, details: String },
}

/// Image bytes with their content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Fetches place photos from the provider's media endpoint
pub struct PhotoProxy {
    client: HttpClient,
    provider: ProviderSettings,
}

impl PhotoProxy {
    pub fn new(client: HttpClient, provider: ProviderSettings) -> Self {
        Self { client, provider }
    }

    /// Fetch the image behind a photo reference such as
    /// `places/<place id>/photos/<photo id>`
    pub async fn fetch(&self, reference: &str) -> Result<Photo, PhotoError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(PhotoError::MissingReference);
        }
        if !is_valid_reference(reference) {
            return Err(PhotoError::InvalidReference);
        }
        let api_key = self.provider.credential().ok_or(PhotoError::Configuration)?;

        let url = format!(
            "{}/{}/media",
            self.provider.base_url.trim_end_matches('/'),
            reference
        );
        let request = ProviderRequest::get(url)
            .header(API_KEY_HEADER, api_key)
            .param("maxHeightPx", self.provider.photo_max_height_px.to_string())
            .param("maxWidthPx", self.provider.photo_max_width_px.to_string());

        debug!("Fetching photo from {}", request.url);
        let response = self.client.execute(request).await?;

        if !response.is_success() {
            warn!("Photo request failed with status {}", response.status);
            return Err(PhotoError::Provider {
                status: response.status,
                details: response.text(),
            });
        }

        let content_type = response
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        debug!("Fetched photo: {} bytes of {}", response.body.len(), content_type);

        Ok(Photo {
            content_type,
            bytes: response.body,
        })
    }
}

/// A reference must look like `places/<id>/photos/<id>` so it can only
/// address the provider's photo resources.
fn is_valid_reference(reference: &str) -> bool {
    let segments: Vec<&str> = reference.split('/').collect();
    segments.len() == 4
        && segments[0] == "places"
        && segments[2] == "photos"
        && segments.iter().all(|s| {
            !s.is_empty()
                && *s != ".."
                && s.chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        })
}
