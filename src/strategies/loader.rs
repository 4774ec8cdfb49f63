//! Strategy loader for building the fallback chain from configuration

use super::registry::StrategyRegistry;
use super::traits::Strategy;
use super::{NearbySearch, TextSearch};
use crate::config::{Settings, StrategyConfig, StrategyKind};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Loader for initializing strategies from configuration
pub struct StrategyLoader;

impl StrategyLoader {
    /// Load all enabled strategies from settings, keeping declared order
    pub fn load(settings: &Settings) -> StrategyRegistry {
        let mut registry = StrategyRegistry::new();

        for config in settings.enabled_strategies() {
            match Self::create_strategy(config) {
                Ok(strategy) => {
                    info!("Loaded strategy: {} ({:?})", config.name, config.kind);
                    registry.register(strategy);
                }
                Err(e) => {
                    warn!("Failed to load strategy {}: {}", config.name, e);
                }
            }
        }

        if registry.is_empty() {
            warn!("No search strategies loaded; every search will come back empty");
        }

        registry
    }

    /// Create a strategy instance from its configuration
    fn create_strategy(config: &StrategyConfig) -> Result<Arc<dyn Strategy>> {
        let strategy: Arc<dyn Strategy> = match config.kind {
            StrategyKind::TextSearch => {
                let text_query = config
                    .text_query
                    .as_deref()
                    .map(str::trim)
                    .filter(|q| !q.is_empty())
                    .ok_or_else(|| anyhow::anyhow!("text_search requires text_query"))?;
                Arc::new(TextSearch::new(&config.name, text_query))
            }
            StrategyKind::NearbySearch => {
                if config.included_types.is_empty() {
                    return Err(anyhow::anyhow!("nearby_search requires included_types"));
                }
                Arc::new(NearbySearch::new(&config.name, config.included_types.clone()))
            }
        };

        Ok(strategy)
    }
}
