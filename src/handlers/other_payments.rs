// src/handlers/other_payments.rs

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
    models::other_payment::{OtherPayment, OtherPaymentPayload},
};

// GET /api/other-payments
#[utoipa::path(
    get,
    path = "/api/other-payments",
    tag = "Other Payments",
    responses((status = 200, description = "Recebimentos avulsos, mais recentes primeiro", body = Vec<OtherPayment>))
)]
pub async fn list_other_payments(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let payments = app_state.other_payment_service.list_other_payments().await;
    Ok((StatusCode::OK, Json(payments)))
}

// POST /api/other-payments
#[utoipa::path(
    post,
    path = "/api/other-payments",
    tag = "Other Payments",
    request_body = OtherPaymentPayload,
    responses(
        (status = 201, description = "Recebimento registrado", body = OtherPayment),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Contrato informado não existe")
    )
)]
pub async fn create_other_payment(
    State(app_state): State<AppState>,
    Json(payload): Json<OtherPaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let payment = app_state.other_payment_service.create_other_payment(payload).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

// PUT /api/other-payments/{id}
#[utoipa::path(
    put,
    path = "/api/other-payments/{id}",
    tag = "Other Payments",
    request_body = OtherPaymentPayload,
    params(("id" = Uuid, Path, description = "ID do recebimento")),
    responses(
        (status = 200, description = "Recebimento atualizado", body = OtherPayment),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Recebimento ou contrato não encontrado")
    )
)]
pub async fn update_other_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<OtherPaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let payment = app_state.other_payment_service.update_other_payment(id, payload).await?;
    Ok((StatusCode::OK, Json(payment)))
}

// DELETE /api/other-payments/{id}
#[utoipa::path(
    delete,
    path = "/api/other-payments/{id}",
    tag = "Other Payments",
    params(("id" = Uuid, Path, description = "ID do recebimento")),
    responses(
        (status = 204, description = "Recebimento removido"),
        (status = 404, description = "Recebimento não encontrado")
    )
)]
pub async fn delete_other_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.other_payment_service.delete_other_payment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
