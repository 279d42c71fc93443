//! Visitor endpoints: registration, log, check-out, pass and export

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{Local, Utc};

use crate::{
    error::AppResult,
    export,
    models::{CreateVisitor, Visitor, VisitorPass, VisitorQuery},
    services::visitors::VisitorLog,
};

/// List visitors (newest first)
#[utoipa::path(
    get,
    path = "/visitors",
    tag = "visitors",
    params(VisitorQuery),
    responses(
        (status = 200, description = "Visitor log", body = VisitorLog)
    )
)]
pub async fn list_visitors(
    State(state): State<crate::AppState>,
    Query(query): Query<VisitorQuery>,
) -> Json<VisitorLog> {
    Json(state.services.visitors.log(&query))
}

/// Register a walk-in visitor
#[utoipa::path(
    post,
    path = "/visitors",
    tag = "visitors",
    request_body = CreateVisitor,
    responses(
        (status = 201, description = "Visitor registered", body = Visitor),
        (status = 400, description = "Missing required field"),
        (status = 500, description = "Visitor could not be saved")
    )
)]
pub async fn register_visitor(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateVisitor>,
) -> AppResult<(StatusCode, Json<Visitor>)> {
    let visitor = state.services.visitors.register(data, Utc::now())?;
    Ok((StatusCode::CREATED, Json(visitor)))
}

/// Get a visitor by pass id
#[utoipa::path(
    get,
    path = "/visitors/{id}",
    tag = "visitors",
    params(("id" = String, Path, description = "Pass ID")),
    responses(
        (status = 200, description = "Visitor details", body = Visitor),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn get_visitor(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Visitor>> {
    let visitor = state.services.visitors.get(&id)?;
    Ok(Json(visitor))
}

/// Check a visitor out with the pass id read from the QR code
#[utoipa::path(
    post,
    path = "/visitors/{id}/check-out",
    tag = "visitors",
    params(("id" = String, Path, description = "Pass ID")),
    responses(
        (status = 200, description = "Visitor checked out", body = Visitor),
        (status = 404, description = "Visitor not found"),
        (status = 409, description = "Visitor already checked out or not yet checked in")
    )
)]
pub async fn check_out_visitor(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Visitor>> {
    let visitor = state.services.visitors.check_out(&id, Utc::now())?;
    Ok(Json(visitor))
}

/// Get the printable pass of a visitor
#[utoipa::path(
    get,
    path = "/visitors/{id}/pass",
    tag = "visitors",
    params(("id" = String, Path, description = "Pass ID")),
    responses(
        (status = 200, description = "Visitor pass", body = VisitorPass),
        (status = 404, description = "Visitor not found")
    )
)]
pub async fn get_visitor_pass(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<VisitorPass>> {
    let pass = state.services.visitors.pass(&id)?;
    Ok(Json(pass))
}

/// Export the filtered visitor log as CSV
#[utoipa::path(
    get,
    path = "/visitors/export",
    tag = "visitors",
    params(VisitorQuery),
    responses(
        (status = 200, description = "CSV file", body = String, content_type = "text/csv")
    )
)]
pub async fn export_visitors(
    State(state): State<crate::AppState>,
    Query(query): Query<VisitorQuery>,
) -> impl IntoResponse {
    let csv = state.services.visitors.export_csv(&query);
    let file_name = export::export_file_name(Local::now().date_naive());

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        csv,
    )
}

/// Erase all visitor data
#[utoipa::path(
    delete,
    path = "/visitors",
    tag = "visitors",
    responses(
        (status = 204, description = "All visitor data cleared"),
        (status = 500, description = "Visitor data could not be cleared")
    )
)]
pub async fn clear_visitors(State(state): State<crate::AppState>) -> AppResult<StatusCode> {
    state.services.visitors.clear()?;
    Ok(StatusCode::NO_CONTENT)
}
