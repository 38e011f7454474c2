//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::api::{BEER_V1_PATH, BEER_V1_UPC_PATH, BEER_V2_PATH, BEER_V2_UPC_PATH};

/// Catalog records are small; anything larger is rejected with 413.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route(
            BEER_V1_PATH,
            get(handlers::list_beers).post(handlers::create_beer_v1),
        )
        .route(
            &format!("{}/{{beer_id}}", BEER_V1_PATH),
            get(handlers::get_beer_by_id)
                .put(handlers::update_beer)
                .delete(handlers::delete_beer),
        )
        .route(
            &format!("{}/{{upc}}", BEER_V1_UPC_PATH),
            get(handlers::get_beer_by_upc),
        );

    let api_v2 = Router::new()
        .route(BEER_V2_PATH, post(handlers::create_beer_v2))
        .route(
            &format!("{}/{{beer_id}}", BEER_V2_PATH),
            get(handlers::get_beer_by_id)
                .put(handlers::update_beer)
                .delete(handlers::delete_beer),
        )
        .route(
            &format!("{}/{{upc}}", BEER_V2_UPC_PATH),
            get(handlers::get_beer_by_upc),
        );

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(api_v1)
        .merge(api_v2)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
