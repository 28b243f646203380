// src/handlers/contracts.rs

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
        client::Client,
        contract::{Contract, ContractFormPayload},
        installment::PaymentInstallment,
        visit_log::VisitLog,
    },
};

// GET /api/contracts
#[utoipa::path(
    get,
    path = "/api/contracts",
    tag = "Contracts",
    responses(
        (status = 200, description = "Contratos, do mais recente para o mais antigo", body = Vec<Contract>)
    )
)]
pub async fn list_contracts(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let contracts = app_state.contract_service.list_contracts().await;
    Ok((StatusCode::OK, Json(contracts)))
}

// GET /api/contracts/{id}
#[utoipa::path(
    get,
    path = "/api/contracts/{id}",
    tag = "Contracts",
    params(("id" = Uuid, Path, description = "ID do contrato")),
    responses(
        (status = 200, description = "Contrato", body = Contract),
        (status = 404, description = "Contrato não encontrado")
    )
)]
pub async fn get_contract(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let contract = app_state.contract_service.get_contract(id).await?;
    Ok((StatusCode::OK, Json(contract)))
}

// POST /api/contracts
#[utoipa::path(
    post,
    path = "/api/contracts",
    tag = "Contracts",
    request_body = ContractFormPayload,
    responses(
        (status = 201, description = "Contrato criado com parcelas e cronograma", body = Contract),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_contract(
    State(app_state): State<AppState>,
    Json(payload): Json<ContractFormPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let contract = app_state.contract_service.create_contract(payload).await?;
    Ok((StatusCode::CREATED, Json(contract)))
}

// PUT /api/contracts/{id}
#[utoipa::path(
    put,
    path = "/api/contracts/{id}",
    tag = "Contracts",
    request_body = ContractFormPayload,
    params(("id" = Uuid, Path, description = "ID do contrato")),
    responses(
        (status = 200, description = "Contrato atualizado; parcelas pagas são preservadas", body = Contract),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Contrato não encontrado")
    )
)]
pub async fn update_contract(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ContractFormPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let contract = app_state.contract_service.update_contract(id, payload).await?;
    Ok((StatusCode::OK, Json(contract)))
}

// DELETE /api/contracts/{id}
#[utoipa::path(
    delete,
    path = "/api/contracts/{id}",
    tag = "Contracts",
    params(("id" = Uuid, Path, description = "ID do contrato")),
    responses(
        (status = 204, description = "Contrato e dados dependentes removidos"),
        (status = 404, description = "Contrato não encontrado")
    )
)]
pub async fn delete_contract(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.contract_service.delete_contract(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/contracts/{id}/installments
#[utoipa::path(
    get,
    path = "/api/contracts/{id}/installments",
    tag = "Contracts",
    params(("id" = Uuid, Path, description = "ID do contrato")),
    responses(
        (status = 200, description = "Parcelas do contrato, entrada primeiro", body = Vec<PaymentInstallment>),
        (status = 404, description = "Contrato não encontrado")
    )
)]
pub async fn list_contract_installments(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let installments = app_state.finance_service.installments_of_contract(id).await?;
    Ok((StatusCode::OK, Json(installments)))
}

// GET /api/contracts/{id}/visit-logs
#[utoipa::path(
    get,
    path = "/api/contracts/{id}/visit-logs",
    tag = "Contracts",
    params(("id" = Uuid, Path, description = "ID do contrato")),
    responses(
        (status = 200, description = "Visitas técnicas do contrato", body = Vec<VisitLog>),
        (status = 404, description = "Contrato não encontrado")
    )
)]
pub async fn list_contract_visit_logs(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let logs = app_state.visit_log_service.visit_logs_of_contract(id).await?;
    Ok((StatusCode::OK, Json(logs)))
}

// GET /api/clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Contracts",
    responses((status = 200, description = "Clientes cadastrados", body = Vec<Client>))
)]
pub async fn list_clients(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.contract_service.list_clients().await;
    Ok((StatusCode::OK, Json(clients)))
}
