//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        // API routes
        .route(
            "/api/find-stores",
            get(handlers::find_stores).post(handlers::find_stores_json),
        )
        .route("/api/get-photo", get(handlers::get_photo))
        .route("/api/test-api", get(handlers::test_api))
        .route("/health", get(handlers::health));

    // Browser client, if one is configured
    if let Some(ref dir) = state.settings.server.static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(cors).with_state(state)
}
