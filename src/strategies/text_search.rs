//! Free-text search biased towards the search circle

use super::traits::*;
use crate::config::StrategyKind;
use crate::search::ProviderError;

/// Text search strategy (`places:searchText`)
pub struct TextSearch {
    name: String,
    text_query: String,
}

impl TextSearch {
    pub fn new(name: impl Into<String>, text_query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text_query: text_query.into(),
        }
    }
}

impl Strategy for TextSearch {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> QueryKind {
        StrategyKind::TextSearch
    }

    fn request(&self, params: &RequestParams) -> Result<ProviderRequest, ProviderError> {
        let body = serde_json::json!({
            "textQuery": self.text_query,
            "locationBias": params.circle(),
            "languageCode": params.language_code,
            "maxResultCount": params.max_result_count,
        });

        Ok(ProviderRequest::post(params.endpoint("places:searchText")?).json(body))
    }
}
