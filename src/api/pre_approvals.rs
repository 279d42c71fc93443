//! Pre-approval endpoints

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::{
    error::AppResult,
    models::{CreatePreApproval, Visitor},
};

/// List pre-approved visitors who have not left yet
#[utoipa::path(
    get,
    path = "/pre-approvals",
    tag = "pre_approvals",
    responses(
        (status = 200, description = "Pending pre-approvals", body = Vec<Visitor>)
    )
)]
pub async fn list_pre_approvals(State(state): State<crate::AppState>) -> Json<Vec<Visitor>> {
    Json(state.services.visitors.pending_pre_approvals())
}

/// Pre-approve an expected visitor
#[utoipa::path(
    post,
    path = "/pre-approvals",
    tag = "pre_approvals",
    request_body = CreatePreApproval,
    responses(
        (status = 201, description = "Visitor pre-approved", body = Visitor),
        (status = 400, description = "Missing required field"),
        (status = 500, description = "Visitor could not be saved")
    )
)]
pub async fn create_pre_approval(
    State(state): State<crate::AppState>,
    Json(data): Json<CreatePreApproval>,
) -> AppResult<(StatusCode, Json<Visitor>)> {
    let visitor = state.services.visitors.pre_approve(data, Utc::now())?;
    Ok((StatusCode::CREATED, Json(visitor)))
}
