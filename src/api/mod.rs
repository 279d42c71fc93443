//! API handlers for Smart VMS REST endpoints

pub mod health;
pub mod openapi;
pub mod pre_approvals;
pub mod stats;
pub mod visitors;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Visitors
        .route(
            "/visitors",
            get(visitors::list_visitors)
                .post(visitors::register_visitor)
                .delete(visitors::clear_visitors),
        )
        .route("/visitors/export", get(visitors::export_visitors))
        .route("/visitors/:id", get(visitors::get_visitor))
        .route("/visitors/:id/pass", get(visitors::get_visitor_pass))
        .route("/visitors/:id/check-out", post(visitors::check_out_visitor))
        // Pre-approvals
        .route(
            "/pre-approvals",
            get(pre_approvals::list_pre_approvals).post(pre_approvals::create_pre_approval),
        )
        // Statistics
        .route("/stats", get(stats::get_stats))
        .route("/stats/dashboard", get(stats::get_dashboard))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
