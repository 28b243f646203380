// src/handlers/checklists.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::checklist::{ChecklistPayload, ProjectChecklist},
};

// GET /api/checklists
#[utoipa::path(
    get,
    path = "/api/checklists",
    tag = "Checklists",
    responses((status = 200, description = "Checklists de obra", body = Vec<ProjectChecklist>))
)]
pub async fn list_checklists(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let checklists = app_state.checklist_service.list_checklists().await;
    Ok((StatusCode::OK, Json(checklists)))
}

// GET /api/checklists/{contract_id}
#[utoipa::path(
    get,
    path = "/api/checklists/{contract_id}",
    tag = "Checklists",
    params(("contract_id" = Uuid, Path, description = "ID do contrato")),
    responses(
        (status = 200, description = "Checklist do contrato (vazio se nunca marcado)", body = ProjectChecklist),
        (status = 404, description = "Contrato não encontrado")
    )
)]
pub async fn get_checklist(
    State(app_state): State<AppState>,
    Path(contract_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let checklist = app_state.checklist_service.get_checklist(contract_id).await?;
    Ok((StatusCode::OK, Json(checklist)))
}

// PUT /api/checklists/{contract_id}
#[utoipa::path(
    put,
    path = "/api/checklists/{contract_id}",
    tag = "Checklists",
    request_body = ChecklistPayload,
    params(("contract_id" = Uuid, Path, description = "ID do contrato")),
    responses(
        (status = 200, description = "Checklist gravado", body = ProjectChecklist),
        (status = 404, description = "Contrato não encontrado")
    )
)]
pub async fn save_checklist(
    State(app_state): State<AppState>,
    Path(contract_id): Path<Uuid>,
    Json(payload): Json<ChecklistPayload>,
) -> Result<impl IntoResponse, AppError> {
    let checklist = app_state
        .checklist_service
        .save_checklist(contract_id, payload.completed_item_ids)
        .await?;
    Ok((StatusCode::OK, Json(checklist)))
}
