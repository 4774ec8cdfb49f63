//! Type-restricted search inside the search circle

use super::traits::*;
use crate::config::StrategyKind;
use crate::search::ProviderError;

/// Nearby search strategy (`places:searchNearby`)
pub struct NearbySearch {
    name: String,
    included_types: Vec<String>,
}

impl NearbySearch {
    pub fn new(name: impl Into<String>, included_types: Vec<String>) -> Self {
        Self {
            name: name.into(),
            included_types,
        }
    }
}

impl Strategy for NearbySearch {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> QueryKind {
        StrategyKind::NearbySearch
    }

    fn request(&self, params: &RequestParams) -> Result<ProviderRequest, ProviderError> {
        let body = serde_json::json!({
            "includedTypes": self.included_types,
            "locationRestriction": params.circle(),
            "languageCode": params.language_code,
            "maxResultCount": params.max_result_count,
        });

        Ok(ProviderRequest::post(params.endpoint("places:searchNearby")?).json(body))
    }
}
