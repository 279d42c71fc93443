//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, pre_approvals, stats, visitors};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Smart VMS API",
        version = "1.0.0",
        description = "Society Visitor Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Visitors
        visitors::list_visitors,
        visitors::register_visitor,
        visitors::get_visitor,
        visitors::check_out_visitor,
        visitors::get_visitor_pass,
        visitors::export_visitors,
        visitors::clear_visitors,
        // Pre-approvals
        pre_approvals::list_pre_approvals,
        pre_approvals::create_pre_approval,
        // Stats
        stats::get_stats,
        stats::get_dashboard,
    ),
    components(
        schemas(
            // Visitors
            crate::models::visitor::Visitor,
            crate::models::visitor::VisitorStatus,
            crate::models::visitor::StatusFilter,
            crate::models::visitor::VisitorQuery,
            crate::models::visitor::CreateVisitor,
            crate::models::visitor::CreatePreApproval,
            crate::models::pass::VisitorPass,
            crate::services::visitors::VisitorLog,
            // Stats
            stats::AnalyticsResponse,
            stats::DashboardResponse,
            stats::PurposeStat,
            crate::analytics::HourCount,
            crate::analytics::PurposeCount,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "visitors", description = "Visitor registration, check-out and log"),
        (name = "pre_approvals", description = "Expected visitors approved by residents"),
        (name = "stats", description = "Statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
