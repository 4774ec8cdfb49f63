//! Search execution and orchestration

use super::error::{ProviderError, SearchError};
use super::models::{
    AttemptStatus, NoResults, SearchOutcome, SearchQuery, SearchResult, StrategyAttempt,
};
use crate::config::ProviderSettings;
use crate::network::HttpClient;
use crate::places::{PlaceRecord, RelevanceFilter};
use crate::strategies::{
    endpoint_url, ProviderRequest, RequestParams, Strategy, StrategyRegistry,
};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const PROBE_QUERY: &str = "restaurants in New York";
const PROBE_FIELD_MASK: &str = "places.displayName,places.id";
const PROBE_RESULT_COUNT: u32 = 5;

/// Search executor that tries strategies in order until one yields
/// relevant places
pub struct Search {
    /// HTTP client for making requests
    client: HttpClient,
    /// Provider endpoint, credential and request options
    provider: ProviderSettings,
    /// Strategies in fallback order
    strategies: StrategyRegistry,
    /// Relevance filter applied to every strategy's records
    filter: RelevanceFilter,
    /// Timeout for each strategy call
    strategy_timeout: Duration,
}

impl Search {
    /// Create a new search executor
    pub fn new(
        client: HttpClient,
        provider: ProviderSettings,
        strategies: StrategyRegistry,
    ) -> Self {
        Self {
            client,
            provider,
            strategies,
            filter: RelevanceFilter::new(),
            strategy_timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT),
        }
    }

    /// Set the per-strategy timeout, capped at the maximum timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.strategy_timeout = timeout.min(Duration::from_secs(crate::MAX_TIMEOUT));
        self
    }

    /// Names of the strategies, in the order they are tried
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.names()
    }

    /// Run the strategy chain for a query.
    ///
    /// The first strategy whose records survive the relevance filter wins;
    /// later strategies are not called. Provider failures only move the
    /// search on to the next strategy.
    pub async fn execute(&self, query: &SearchQuery) -> Result<SearchOutcome, SearchError> {
        let api_key = self.credential()?;

        info!(
            "Searching near {}, {} with radius {}m using {} strategies",
            query.latitude,
            query.longitude,
            query.radius_meters,
            self.strategies.len()
        );

        let params = RequestParams::new(query, &self.provider);
        let mut attempts = Vec::with_capacity(self.strategies.len());

        for strategy in self.strategies.iter() {
            let name = strategy.name();
            let start = Instant::now();
            let result = self.run_strategy(strategy.as_ref(), &params, api_key).await;
            let elapsed = start.elapsed();

            let status = match result {
                Ok(places) if places.is_empty() => {
                    debug!("No results from {} in {:?}", name, elapsed);
                    AttemptStatus::NoResults
                }
                Ok(places) => {
                    let total_found = places.len();
                    let filtered = self.filter.apply(places);

                    if !filtered.is_empty() {
                        info!(
                            "Strategy {} found {} places, {} relevant, in {:?}",
                            name,
                            total_found,
                            filtered.len(),
                            elapsed
                        );
                        return Ok(SearchOutcome::Found(SearchResult {
                            filtered_count: filtered.len(),
                            places: filtered,
                            strategy_used: name.to_string(),
                            total_found,
                        }));
                    }

                    debug!(
                        "Strategy {} returned {} places, none relevant",
                        name, total_found
                    );
                    AttemptStatus::FilteredOut(total_found)
                }
                Err(e) => {
                    warn!("Strategy {} failed after {:?}: {}", name, elapsed, e);
                    AttemptStatus::Failed(e.to_string())
                }
            };

            attempts.push(StrategyAttempt {
                strategy: name.to_string(),
                status,
            });
        }

        info!("All {} search strategies came back empty", attempts.len());
        Ok(SearchOutcome::Exhausted(NoResults::new(attempts)))
    }

    /// Execute a single strategy against the provider
    async fn run_strategy(
        &self,
        strategy: &dyn Strategy,
        params: &RequestParams,
        api_key: &str,
    ) -> Result<Vec<PlaceRecord>, ProviderError> {
        let request = strategy
            .request(params)?
            .authorize(api_key, &self.provider.field_mask);

        debug!("Trying {} at {}", strategy.name(), request.url);

        let response = self
            .client
            .execute_with_timeout(request, self.strategy_timeout)
            .await
            .map_err(|e| self.transport_error(e))?;

        debug!(
            "{} responded with status {} from {}",
            strategy.name(),
            response.status,
            response.url
        );
        strategy.response(response)
    }

    /// Issue one small text search to check the credential and endpoint
    pub async fn probe(&self) -> Result<ProbeReport, SearchError> {
        let api_key = self.credential()?;

        let body = serde_json::json!({
            "textQuery": PROBE_QUERY,
            "languageCode": self.provider.language_code,
            "maxResultCount": PROBE_RESULT_COUNT,
        });
        let url = endpoint_url(&self.provider.base_url, "places:searchText")?;
        let request = ProviderRequest::post(url)
            .json(body)
            .authorize(api_key, PROBE_FIELD_MASK);

        info!("Probing place search provider at {}", request.url);
        let response = self
            .client
            .execute_with_timeout(request, self.strategy_timeout)
            .await
            .map_err(|e| self.transport_error(e))?;

        let success = response.is_success();
        let data: serde_json::Value = response.json()?;

        Ok(ProbeReport {
            success,
            status: response.status,
            data,
            message: if success {
                "Places API (New) is working correctly!".to_string()
            } else {
                "Places API (New) returned an error".to_string()
            },
        })
    }

    fn transport_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::Timeout(self.strategy_timeout.as_secs_f64())
        } else {
            ProviderError::Transport(error)
        }
    }

    fn credential(&self) -> Result<&str, SearchError> {
        self.provider.credential().ok_or(SearchError::Configuration)
    }
}

/// Outcome of a provider probe
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub success: bool,
    pub status: u16,
    pub data: serde_json::Value,
    pub message: String,
}
