// src/handlers/schedules.rs

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
    models::{
        progress::ProjectProgress,
        schedule::{ProjectSchedule, ReplaceStagesPayload, StageCompletionPayload},
    },
};

// GET /api/schedules
#[utoipa::path(
    get,
    path = "/api/schedules",
    tag = "Schedules",
    responses((status = 200, description = "Cronogramas de todos os contratos", body = Vec<ProjectSchedule>))
)]
pub async fn list_schedules(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let schedules = app_state.project_service.list_schedules().await;
    Ok((StatusCode::OK, Json(schedules)))
}

// GET /api/schedules/{contract_id}
#[utoipa::path(
    get,
    path = "/api/schedules/{contract_id}",
    tag = "Schedules",
    params(("contract_id" = Uuid, Path, description = "ID do contrato")),
    responses(
        (status = 200, description = "Cronograma do contrato", body = ProjectSchedule),
        (status = 404, description = "Contrato ou cronograma não encontrado")
    )
)]
pub async fn get_schedule(
    State(app_state): State<AppState>,
    Path(contract_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let schedule = app_state.project_service.get_schedule(contract_id).await?;
    Ok((StatusCode::OK, Json(schedule)))
}

// PUT /api/schedules/{contract_id}/stages/{stage_id}/completion
#[utoipa::path(
    put,
    path = "/api/schedules/{contract_id}/stages/{stage_id}/completion",
    tag = "Schedules",
    request_body = StageCompletionPayload,
    params(
        ("contract_id" = Uuid, Path, description = "ID do contrato"),
        ("stage_id" = i32, Path, description = "ID da etapa")
    ),
    responses(
        (status = 200, description = "Etapa concluída; etapas seguintes recalculadas", body = ProjectSchedule),
        (status = 404, description = "Contrato, cronograma ou etapa não encontrados")
    )
)]
pub async fn complete_stage(
    State(app_state): State<AppState>,
    Path((contract_id, stage_id)): Path<(Uuid, i32)>,
    Json(payload): Json<StageCompletionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let schedule = app_state
        .project_service
        .complete_stage(contract_id, stage_id, payload.completion_date)
        .await?;
    Ok((StatusCode::OK, Json(schedule)))
}

// DELETE /api/schedules/{contract_id}/stages/{stage_id}/completion
#[utoipa::path(
    delete,
    path = "/api/schedules/{contract_id}/stages/{stage_id}/completion",
    tag = "Schedules",
    params(
        ("contract_id" = Uuid, Path, description = "ID do contrato"),
        ("stage_id" = i32, Path, description = "ID da etapa")
    ),
    responses(
        (status = 200, description = "Conclusão removida; cronograma recalculado", body = ProjectSchedule),
        (status = 404, description = "Contrato, cronograma ou etapa não encontrados")
    )
)]
pub async fn reopen_stage(
    State(app_state): State<AppState>,
    Path((contract_id, stage_id)): Path<(Uuid, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let schedule = app_state.project_service.reopen_stage(contract_id, stage_id).await?;
    Ok((StatusCode::OK, Json(schedule)))
}

// PUT /api/schedules/{contract_id}/stages
#[utoipa::path(
    put,
    path = "/api/schedules/{contract_id}/stages",
    tag = "Schedules",
    request_body = ReplaceStagesPayload,
    params(("contract_id" = Uuid, Path, description = "ID do contrato")),
    responses(
        (status = 200, description = "Etapas substituídas e datas recalculadas", body = ProjectSchedule),
        (status = 400, description = "Etapas inválidas"),
        (status = 409, description = "IDs de etapa repetidos")
    )
)]
pub async fn replace_stages(
    State(app_state): State<AppState>,
    Path(contract_id): Path<Uuid>,
    Json(payload): Json<ReplaceStagesPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let schedule = app_state
        .project_service
        .replace_stages(contract_id, payload.stages)
        .await?;
    Ok((StatusCode::OK, Json(schedule)))
}

// GET /api/progress
#[utoipa::path(
    get,
    path = "/api/progress",
    tag = "Schedules",
    responses((status = 200, description = "Visão resumida por fase de cada projeto", body = Vec<ProjectProgress>))
)]
pub async fn list_progress(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let progress = app_state.project_service.list_progress().await;
    Ok((StatusCode::OK, Json(progress)))
}
