//! Statistics endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{analytics::HourCount, models::Visitor};

/// Analytics dashboard response
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    /// All visits ever recorded
    pub total_visitors: usize,
    /// Check-ins today (server local day)
    pub today_visitors: usize,
    /// Check-ins this calendar week
    pub weekly_visitors: usize,
    /// Visitors currently inside
    pub active_visitors: usize,
    /// Check-outs today
    pub check_outs_today: usize,
    /// Visits with a recorded check-out
    pub completed_visits: usize,
    /// Mean stay of completed visits, in minutes
    pub average_stay_minutes: i64,
    /// Busiest check-in hours
    pub peak_hours: Vec<HourCount>,
    /// Most common purposes
    pub purpose_distribution: Vec<PurposeStat>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurposeStat {
    pub purpose: String,
    pub count: usize,
    /// Share of all visits, in whole percent
    pub share_percent: u32,
}

/// Home dashboard response
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_visitors: usize,
    pub today_check_ins: usize,
    /// Visitors currently inside
    pub active_visitors: usize,
    /// Pre-approved visitors not yet gone
    pub pending_pre_approvals: usize,
    /// Latest check-ins first
    pub recent_visitors: Vec<Visitor>,
}

/// Get visitor analytics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Visitor analytics", body = AnalyticsResponse)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> Json<AnalyticsResponse> {
    Json(state.services.stats.analytics())
}

/// Get the dashboard summary
#[utoipa::path(
    get,
    path = "/stats/dashboard",
    tag = "stats",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardResponse)
    )
)]
pub async fn get_dashboard(State(state): State<crate::AppState>) -> Json<DashboardResponse> {
    Json(state.services.stats.dashboard())
}
