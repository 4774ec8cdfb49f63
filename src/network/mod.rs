//! HTTP networking module
//!
//! Provides the HTTP client used for place searches and photo fetches.

mod client;

pub use client::HttpClient;
