//! HTTP API Layer
//!
//! REST API for the travel insurance pricing engine using Axum.
//!
//! The router is built over any [`domain_pricing::RateRepository`], so the
//! same routes run against PostgreSQL in production and the in-memory store
//! in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(rates);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_pricing::RateRepository;

use crate::handlers::{health, travel};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub rates: Arc<dyn RateRepository>,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `rates` - Rate repository backing every quote
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(rates: Arc<dyn RateRepository>) -> Router {
    let state = AppState { rates };

    let travel_routes = Router::new()
        .route("/calculate-premium", post(travel::calculate_premium))
        .route(
            "/calculate-group-premium",
            post(travel::calculate_group_premium),
        )
        .route("/exchange-rate", get(travel::exchange_rate));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/travel", travel_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
