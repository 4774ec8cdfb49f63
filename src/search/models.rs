//! Search query and outcome models

use super::error::SearchError;
use crate::config::SearchSettings;
use crate::places::PlaceRecord;
use serde::{Deserialize, Serialize};

/// Message returned when every strategy came back empty
pub const NO_RESULTS_MESSAGE: &str = "No comic book stores found using any search method";

const MISSING_COORDINATES: &str = "Latitude and longitude are required.";
const INVALID_COORDINATES: &str = "Latitude and longitude must be valid coordinates.";

/// A validated search around a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
}

impl SearchQuery {
    pub fn new(latitude: f64, longitude: f64, radius_meters: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_meters,
        }
    }

    /// Build a query from raw request values.
    ///
    /// Latitude and longitude must be present and numeric. The radius falls
    /// back to the configured default when absent, non-numeric or not
    /// positive, and is capped at the configured maximum.
    pub fn from_raw(
        lat: Option<&str>,
        lng: Option<&str>,
        radius: Option<&str>,
        settings: &SearchSettings,
    ) -> Result<Self, SearchError> {
        let (lat, lng) = match (non_blank(lat), non_blank(lng)) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => return Err(SearchError::InvalidArgument(MISSING_COORDINATES.to_string())),
        };

        let latitude = parse_coordinate(lat, 90.0)?;
        let longitude = parse_coordinate(lng, 180.0)?;

        let radius_meters = non_blank(radius)
            .and_then(|r| r.parse::<f64>().ok())
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(settings.default_radius_meters)
            .min(settings.max_radius_meters);

        Ok(Self::new(latitude, longitude, radius_meters))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_coordinate(value: &str, bound: f64) -> Result<f64, SearchError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= bound)
        .ok_or_else(|| SearchError::InvalidArgument(INVALID_COORDINATES.to_string()))
}

/// Places found by the first strategy whose filtered results were non-empty
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub places: Vec<PlaceRecord>,
    #[serde(rename = "strategy")]
    pub strategy_used: String,
    /// Raw record count returned by the winning strategy
    pub total_found: usize,
    /// Record count after the relevance filter
    pub filtered_count: usize,
}

/// What happened when a strategy was tried
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    Failed(String),
    NoResults,
    FilteredOut(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyAttempt {
    pub strategy: String,
    pub status: AttemptStatus,
}

/// Every strategy was tried without a relevant place
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoResults {
    pub places: Vec<PlaceRecord>,
    pub message: String,
    pub searched_strategies: Vec<String>,
    #[serde(skip)]
    pub attempts: Vec<StrategyAttempt>,
}

impl NoResults {
    pub fn new(attempts: Vec<StrategyAttempt>) -> Self {
        Self {
            places: vec![],
            message: NO_RESULTS_MESSAGE.to_string(),
            searched_strategies: attempts.iter().map(|a| a.strategy.clone()).collect(),
            attempts,
        }
    }
}

/// Result of a search; finding nothing is a normal outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchOutcome {
    Found(SearchResult),
    Exhausted(NoResults),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SearchSettings {
        SearchSettings::default()
    }

    #[test]
    fn test_parse_full_query() {
        let query =
            SearchQuery::from_raw(Some("38.9072"), Some("-77.0369"), Some("2500"), &settings())
                .unwrap();
        assert_eq!(query, SearchQuery::new(38.9072, -77.0369, 2500.0));
    }

    #[test]
    fn test_missing_coordinates() {
        for (lat, lng) in [(None, Some("1")), (Some("1"), None), (Some(" "), Some("1"))] {
            let err = SearchQuery::from_raw(lat, lng, None, &settings()).unwrap_err();
            assert_eq!(err.to_string(), MISSING_COORDINATES);
        }
    }

    #[test]
    fn test_malformed_coordinates() {
        for (lat, lng) in [("abc", "1"), ("91", "0"), ("0", "-180.5"), ("NaN", "0")] {
            let err = SearchQuery::from_raw(Some(lat), Some(lng), None, &settings()).unwrap_err();
            assert!(matches!(err, SearchError::InvalidArgument(_)));
            assert_eq!(err.to_string(), INVALID_COORDINATES);
        }
    }

    #[test]
    fn test_radius_fallback() {
        for radius in [None, Some(""), Some("far"), Some("0"), Some("-5"), Some("inf")] {
            let query = SearchQuery::from_raw(Some("1"), Some("2"), radius, &settings()).unwrap();
            assert_eq!(query.radius_meters, 10_000.0);
        }
    }

    #[test]
    fn test_radius_capped() {
        let query =
            SearchQuery::from_raw(Some("1"), Some("2"), Some("80000"), &settings()).unwrap();
        assert_eq!(query.radius_meters, 50_000.0);
    }

    #[test]
    fn test_no_results_serialization() {
        let outcome = SearchOutcome::Exhausted(NoResults::new(vec![StrategyAttempt {
            strategy: "Text Search for Comics".to_string(),
            status: AttemptStatus::NoResults,
        }]));

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "places": [],
                "message": NO_RESULTS_MESSAGE,
                "searchedStrategies": ["Text Search for Comics"],
            })
        );
    }

    #[test]
    fn test_found_serialization() {
        let outcome = SearchOutcome::Found(SearchResult {
            places: vec![PlaceRecord::new("Big Planet Comics", "p1")],
            strategy_used: "Nearby Search for Book Stores".to_string(),
            total_found: 3,
            filtered_count: 1,
        });

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["strategy"], "Nearby Search for Book Stores");
        assert_eq!(value["totalFound"], 3);
        assert_eq!(value["filteredCount"], 1);
        assert_eq!(value["places"][0]["displayName"], "Big Planet Comics");
    }
}
