// src/handlers/partners.rs

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
    models::partner::{Partner, PartnerPayload},
};

// GET /api/partners
#[utoipa::path(
    get,
    path = "/api/partners",
    tag = "Partners",
    responses((status = 200, description = "Parceiros e fornecedores", body = Vec<Partner>))
)]
pub async fn list_partners(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let partners = app_state.partner_service.list_partners().await;
    Ok((StatusCode::OK, Json(partners)))
}

// POST /api/partners
#[utoipa::path(
    post,
    path = "/api/partners",
    tag = "Partners",
    request_body = PartnerPayload,
    responses(
        (status = 201, description = "Parceiro criado", body = Partner),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_partner(
    State(app_state): State<AppState>,
    Json(payload): Json<PartnerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let partner = app_state.partner_service.create_partner(payload).await?;
    Ok((StatusCode::CREATED, Json(partner)))
}

// PUT /api/partners/{id}
#[utoipa::path(
    put,
    path = "/api/partners/{id}",
    tag = "Partners",
    request_body = PartnerPayload,
    params(("id" = Uuid, Path, description = "ID do parceiro")),
    responses(
        (status = 200, description = "Parceiro atualizado", body = Partner),
        (status = 404, description = "Parceiro não encontrado")
    )
)]
pub async fn update_partner(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PartnerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let partner = app_state.partner_service.update_partner(id, payload).await?;
    Ok((StatusCode::OK, Json(partner)))
}

// DELETE /api/partners/{id}
#[utoipa::path(
    delete,
    path = "/api/partners/{id}",
    tag = "Partners",
    params(("id" = Uuid, Path, description = "ID do parceiro")),
    responses(
        (status = 204, description = "Parceiro removido"),
        (status = 404, description = "Parceiro não encontrado")
    )
)]
pub async fn delete_partner(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.partner_service.delete_partner(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
