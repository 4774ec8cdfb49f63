//! Search orchestration module
//!
//! Runs the ordered strategy chain against the place provider, filters
//! the records and shapes the outcome.

mod error;
mod executor;
mod models;

pub use error::{ProviderError, SearchError};
pub use executor::{ProbeReport, Search};
pub use models::*;
