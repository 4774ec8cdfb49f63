//! Settings structures for ComicFinder configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
    pub strategies: StrategyList,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would make every request fail
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("search.strategy_timeout", self.search.strategy_timeout),
            ("search.default_radius_meters", self.search.default_radius_meters),
            ("search.max_radius_meters", self.search.max_radius_meters),
            ("outgoing.request_timeout", self.outgoing.request_timeout),
        ];
        for (key, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                bail!("{} must be a positive number, got {}", key, value);
            }
        }
        Ok(())
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary variable source
    pub fn merge_vars<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // API_KEY is the legacy variable name
        if let Some(val) = var("COMICFINDER_API_KEY").or_else(|| var("API_KEY")) {
            self.provider.api_key = Some(val);
        }
        if let Some(val) = var("COMICFINDER_PROVIDER_URL") {
            self.provider.base_url = val;
        }
        if let Some(val) = var("COMICFINDER_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("COMICFINDER_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = var("COMICFINDER_STATIC_DIR") {
            self.server.static_dir = Some(val);
        }
    }

    /// Get all enabled strategies, in declared order
    pub fn enabled_strategies(&self) -> Vec<&StrategyConfig> {
        self.strategies.0.iter().filter(|s| !s.disabled).collect()
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Directory holding the browser client, served for unmatched paths
    pub static_dir: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 3000,
            bind_address: "127.0.0.1".to_string(),
            static_dir: None,
        }
    }
}

/// Place-search provider settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// API key sent as `X-Goog-Api-Key`
    pub api_key: Option<String>,
    /// Base URL of the Places API
    pub base_url: String,
    /// Language for returned names
    pub language_code: String,
    /// Maximum results requested per strategy
    pub max_result_count: u32,
    /// Attributes requested from the provider
    pub field_mask: String,
    /// Photo dimensions requested from the media endpoint
    pub photo_max_height_px: u32,
    pub photo_max_width_px: u32,
}

impl ProviderSettings {
    /// The API key, if one is configured and non-blank
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://places.googleapis.com/v1".to_string(),
            language_code: "en".to_string(),
            max_result_count: 20,
            field_mask: DEFAULT_FIELD_MASK.to_string(),
            photo_max_height_px: 400,
            photo_max_width_px: 400,
        }
    }
}

// Keeps the key out of debug logs.
impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("language_code", &self.language_code)
            .field("max_result_count", &self.max_result_count)
            .field("field_mask", &self.field_mask)
            .field("photo_max_height_px", &self.photo_max_height_px)
            .field("photo_max_width_px", &self.photo_max_width_px)
            .finish()
    }
}

/// Field mask limiting provider responses to what the service uses
pub const DEFAULT_FIELD_MASK: &str =
    "places.displayName,places.id,places.rating,places.photos,places.name,places.formattedAddress";

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Radius used when the request has none, or an unusable one
    pub default_radius_meters: f64,
    /// Upper bound accepted by the provider for a search circle
    pub max_radius_meters: f64,
    /// Timeout for a single strategy call in seconds
    pub strategy_timeout: f64,
}

impl SearchSettings {
    /// Per-strategy timeout, clamped to the supported range
    pub fn timeout(&self) -> Duration {
        clamp_timeout(self.strategy_timeout)
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_radius_meters: 10_000.0,
            max_radius_meters: 50_000.0,
            strategy_timeout: crate::DEFAULT_TIMEOUT as f64,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl OutgoingSettings {
    /// Default request timeout, clamped to the supported range
    pub fn timeout(&self) -> Duration {
        clamp_timeout(self.request_timeout)
    }
}

fn clamp_timeout(secs: f64) -> Duration {
    if !secs.is_finite() || secs <= 0.0 {
        return Duration::from_secs(crate::DEFAULT_TIMEOUT);
    }
    Duration::from_secs_f64(secs.clamp(crate::MIN_TIMEOUT as f64, crate::MAX_TIMEOUT as f64))
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: crate::DEFAULT_TIMEOUT as f64,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// How a strategy talks to the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Free-text search biased towards the search circle
    TextSearch,
    /// Type-restricted search inside the search circle
    NearbySearch,
}

/// Individual strategy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Strategy name, reported back to callers
    pub name: String,
    /// Request template to use
    pub kind: StrategyKind,
    /// Query text for text searches
    #[serde(default)]
    pub text_query: Option<String>,
    /// Place types for nearby searches
    #[serde(default)]
    pub included_types: Vec<String>,
    /// Whether the strategy is skipped
    #[serde(default)]
    pub disabled: bool,
}

impl StrategyConfig {
    pub fn text(name: impl Into<String>, text_query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: StrategyKind::TextSearch,
            text_query: Some(text_query.into()),
            included_types: vec![],
            disabled: false,
        }
    }

    pub fn nearby(name: impl Into<String>, included_types: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: StrategyKind::NearbySearch,
            text_query: None,
            included_types: included_types.iter().map(|t| t.to_string()).collect(),
            disabled: false,
        }
    }
}

/// Ordered strategy list; defaults to the built-in fallback chain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyList(pub Vec<StrategyConfig>);

impl Default for StrategyList {
    fn default() -> Self {
        Self(default_strategies())
    }
}

/// Default strategy chain. "comic_book_store" is not a place type in the
/// v1 API, so the generic book store type is tried between the text queries.
fn default_strategies() -> Vec<StrategyConfig> {
    vec![
        StrategyConfig::text("Text Search for Comic Book Stores", "comic book store"),
        StrategyConfig::nearby("Nearby Search for Book Stores", &["book_store"]),
        StrategyConfig::text("Text Search for Comics", "comics"),
    ]
}
