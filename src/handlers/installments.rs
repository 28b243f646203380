// src/handlers/installments.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::installment::{PaymentInstallment, RecordPaymentPayload},
};

// GET /api/installments
#[utoipa::path(
    get,
    path = "/api/installments",
    tag = "Installments",
    responses((status = 200, description = "Todas as parcelas, por vencimento", body = Vec<PaymentInstallment>))
)]
pub async fn list_installments(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let installments = app_state.finance_service.list_installments().await;
    Ok((StatusCode::OK, Json(installments)))
}

// PUT /api/installments/{id}/payment
#[utoipa::path(
    put,
    path = "/api/installments/{id}/payment",
    tag = "Installments",
    request_body = RecordPaymentPayload,
    params(("id" = Uuid, Path, description = "ID da parcela")),
    responses(
        (status = 200, description = "Status de pagamento atualizado", body = PaymentInstallment),
        (status = 400, description = "Parcela paga sem data de pagamento"),
        (status = 404, description = "Parcela não encontrada")
    )
)]
pub async fn record_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordPaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let installment = app_state.finance_service.record_payment(id, payload).await?;
    Ok((StatusCode::OK, Json(installment)))
}

// GET /api/installments/{id}/receipt
#[utoipa::path(
    get,
    path = "/api/installments/{id}/receipt",
    tag = "Installments",
    params(("id" = Uuid, Path, description = "ID da parcela")),
    responses(
        (status = 200, description = "Recibo em PDF", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "Parcela não encontrada"),
        (status = 409, description = "Parcela ainda não foi paga")
    )
)]
pub async fn download_receipt(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pdf_bytes = app_state.receipt_service.generate_receipt_pdf(id).await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"recibo-{}.pdf\"", id),
        ),
    ];

    Ok((StatusCode::OK, headers, pdf_bytes))
}
