//! Search strategy module
//!
//! A strategy is one named way of asking the place provider for comic book
//! stores. Strategies are loaded from configuration into an ordered
//! registry and tried in that order.

mod loader;
mod registry;
mod traits;

pub mod nearby_search;
pub mod text_search;

pub use loader::StrategyLoader;
pub use nearby_search::NearbySearch;
pub use registry::StrategyRegistry;
pub use text_search::TextSearch;
pub use traits::*;
