//! ComicFinder: locate nearby comic book stores
//!
//! A small web service that asks the Google Places API for comic book
//! stores around a point, trying several query formulations in order until
//! one of them yields plausible matches, and proxies place photos so the
//! browser never needs the API key.

pub mod config;
pub mod network;
pub mod photos;
pub mod places;
pub mod search;
pub mod strategies;
pub mod web;

pub use config::Settings;
pub use places::{PlaceRecord, RelevanceFilter};
pub use search::{Search, SearchError, SearchOutcome, SearchQuery, SearchResult};
pub use strategies::Strategy;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for provider requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 10;

/// Minimum timeout that can be set
pub const MIN_TIMEOUT: u64 = 1;

/// Maximum timeout that can be set
pub const MAX_TIMEOUT: u64 = 30;
