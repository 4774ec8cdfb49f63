//! Web server module
//!
//! Provides the HTTP API for ComicFinder.

mod error;
mod handlers;
mod routes;
mod state;

pub use error::ErrorBody;
pub use handlers::{SearchBody, SearchParams};
pub use routes::create_router;
pub use state::AppState;
