//! Place record and provider wire types

use serde::{Deserialize, Serialize};

/// A place as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    /// Human readable name, empty when the provider gave none
    pub display_name: String,
    /// Provider place identifier
    pub id: String,
    /// Average user rating
    pub rating: Option<f64>,
    /// Opaque token for the photo proxy
    pub photo_reference: Option<String>,
    /// Formatted street address
    pub address: Option<String>,
}

impl PlaceRecord {
    /// Create a record with just a name and id
    pub fn new(display_name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            id: id.into(),
            rating: None,
            photo_reference: None,
            address: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_photo(mut self, reference: impl Into<String>) -> Self {
        self.photo_reference = Some(reference.into());
        self
    }

    /// Lowercased name and address, the text the relevance filter inspects
    pub fn search_text(&self) -> String {
        let address = self.address.as_deref().unwrap_or_default();
        format!("{} {}", self.display_name, address).to_lowercase()
    }
}

impl From<RawPlace> for PlaceRecord {
    fn from(raw: RawPlace) -> Self {
        let display_name = raw
            .display_name
            .and_then(|d| d.text)
            .filter(|t| !t.is_empty())
            .or(raw.name)
            .unwrap_or_default();

        let photo_reference = raw.photos.into_iter().flatten().find_map(|p| p.name);

        Self {
            display_name,
            id: raw.id.unwrap_or_default(),
            rating: raw.rating,
            photo_reference,
            address: raw.formatted_address,
        }
    }
}

/// Body of a text or nearby search response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlacesResponse {
    #[serde(default)]
    pub places: Option<Vec<RawPlace>>,
}

impl PlacesResponse {
    /// Normalize every returned place
    pub fn into_records(self) -> Vec<PlaceRecord> {
        self.places
            .into_iter()
            .flatten()
            .map(PlaceRecord::from)
            .collect()
    }
}

/// A place exactly as the provider encodes it; every field may be absent
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlace {
    #[serde(default)]
    pub id: Option<String>,
    /// Resource name, e.g. `places/ChIJ...`
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<LocalizedText>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub photos: Option<Vec<RawPhoto>>,
    #[serde(default)]
    pub formatted_address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPhoto {
    /// Resource name, e.g. `places/ChIJ.../photos/AUc...`
    #[serde(default)]
    pub name: Option<String>,
}
