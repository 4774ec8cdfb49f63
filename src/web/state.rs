//! Application state shared across handlers

use crate::config::Settings;
use crate::network::HttpClient;
use crate::photos::PhotoProxy;
use crate::search::Search;
use crate::strategies::StrategyLoader;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search executor
    pub search: Arc<Search>,
    /// Photo proxy
    pub photos: Arc<PhotoProxy>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, client: HttpClient) -> Self {
        let strategies = StrategyLoader::load(&settings);
        let search = Search::new(client.clone(), settings.provider.clone(), strategies)
            .with_timeout(settings.search.timeout());
        let photos = PhotoProxy::new(client, settings.provider.clone());

        Self {
            settings: Arc::new(settings),
            search: Arc::new(search),
            photos: Arc::new(photos),
        }
    }
}
