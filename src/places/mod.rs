//! Place records and relevance filtering
//!
//! Defines the normalized place record handed back to callers, the
//! provider's wire format it is built from, and the keyword filter.

mod filter;
mod types;

pub use filter::{RelevanceFilter, KEYWORDS};
pub use types::*;
