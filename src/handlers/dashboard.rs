// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::{DashboardSummary, LatePaymentEntry, MonthlyRevenueEntry, ProjectionEntry, YearQuery},
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses((status = 200, description = "Cards do topo do painel", body = DashboardSummary))
)]
pub async fn get_summary(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.finance_service.summary().await;
    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/dashboard/monthly-revenue?year=2024
#[utoipa::path(
    get,
    path = "/api/dashboard/monthly-revenue",
    tag = "Dashboard",
    params(YearQuery),
    responses((status = 200, description = "Recebido por mês de pagamento", body = Vec<MonthlyRevenueEntry>))
)]
pub async fn get_monthly_revenue(
    State(app_state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> Result<impl IntoResponse, AppError> {
    let revenue = app_state.finance_service.monthly_revenue(query.year).await;
    Ok((StatusCode::OK, Json(revenue)))
}

// GET /api/dashboard/late-payments
#[utoipa::path(
    get,
    path = "/api/dashboard/late-payments",
    tag = "Dashboard",
    responses((status = 200, description = "Parcelas pendentes vencidas", body = Vec<LatePaymentEntry>))
)]
pub async fn get_late_payments(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let late = app_state.finance_service.late_payments().await;
    Ok((StatusCode::OK, Json(late)))
}

// GET /api/dashboard/projections?year=2024
#[utoipa::path(
    get,
    path = "/api/dashboard/projections",
    tag = "Dashboard",
    params(YearQuery),
    responses((status = 200, description = "Esperado x recebido por mês", body = Vec<ProjectionEntry>))
)]
pub async fn get_projections(
    State(app_state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> Result<impl IntoResponse, AppError> {
    let projections = app_state.finance_service.projections(query.year).await;
    Ok((StatusCode::OK, Json(projections)))
}
