// src/handlers/visit_logs.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::visit_log::{VisitLog, VisitLogPayload},
};

// GET /api/visit-logs
#[utoipa::path(
    get,
    path = "/api/visit-logs",
    tag = "Visit Logs",
    responses((status = 200, description = "Visitas técnicas, mais recentes primeiro", body = Vec<VisitLog>))
)]
pub async fn list_visit_logs(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let logs = app_state.visit_log_service.list_visit_logs().await;
    Ok((StatusCode::OK, Json(logs)))
}

// POST /api/visit-logs
#[utoipa::path(
    post,
    path = "/api/visit-logs",
    tag = "Visit Logs",
    request_body = VisitLogPayload,
    responses(
        (status = 201, description = "Visita registrada", body = VisitLog),
        (status = 404, description = "Contrato não encontrado")
    )
)]
pub async fn create_visit_log(
    State(app_state): State<AppState>,
    Json(payload): Json<VisitLogPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let log = app_state.visit_log_service.create_visit_log(payload).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

// PUT /api/visit-logs/{id}
#[utoipa::path(
    put,
    path = "/api/visit-logs/{id}",
    tag = "Visit Logs",
    request_body = VisitLogPayload,
    params(("id" = Uuid, Path, description = "ID da visita")),
    responses(
        (status = 200, description = "Visita atualizada", body = VisitLog),
        (status = 404, description = "Visita não encontrada"),
        (status = 409, description = "Visita pertence a outro contrato")
    )
)]
pub async fn update_visit_log(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<VisitLogPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let log = app_state.visit_log_service.update_visit_log(id, payload).await?;
    Ok((StatusCode::OK, Json(log)))
}

// DELETE /api/visit-logs/{id}
#[utoipa::path(
    delete,
    path = "/api/visit-logs/{id}",
    tag = "Visit Logs",
    params(("id" = Uuid, Path, description = "ID da visita")),
    responses(
        (status = 204, description = "Visita removida"),
        (status = 404, description = "Visita não encontrada")
    )
)]
pub async fn delete_visit_log(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.visit_log_service.delete_visit_log(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
