// src/handlers/settings.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        pricing::{PricingQuote, PricingTables, QuoteQuery},
        schedule::{ProjectStageTemplateItem, StageTemplatePayload},
    },
};

// GET /api/settings/stage-template
#[utoipa::path(
    get,
    path = "/api/settings/stage-template",
    tag = "Settings",
    responses((status = 200, description = "Modelo de etapas usado em cronogramas novos", body = Vec<ProjectStageTemplateItem>))
)]
pub async fn get_stage_template(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let template = app_state.project_service.stage_template().await;
    Ok((StatusCode::OK, Json(template)))
}

// PUT /api/settings/stage-template
#[utoipa::path(
    put,
    path = "/api/settings/stage-template",
    tag = "Settings",
    request_body = StageTemplatePayload,
    responses(
        (status = 200, description = "Modelo atualizado", body = Vec<ProjectStageTemplateItem>),
        (status = 400, description = "Modelo inválido"),
        (status = 409, description = "IDs de etapa repetidos")
    )
)]
pub async fn update_stage_template(
    State(app_state): State<AppState>,
    Json(payload): Json<StageTemplatePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let template = app_state.project_service.update_stage_template(payload.stages).await?;
    Ok((StatusCode::OK, Json(template)))
}

// GET /api/settings/pricing
#[utoipa::path(
    get,
    path = "/api/settings/pricing",
    tag = "Settings",
    responses((status = 200, description = "Tabelas de preço", body = PricingTables))
)]
pub async fn get_pricing(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let tables = app_state.pricing_service.pricing().await;
    Ok((StatusCode::OK, Json(tables)))
}

// PUT /api/settings/pricing
#[utoipa::path(
    put,
    path = "/api/settings/pricing",
    tag = "Settings",
    request_body = PricingTables,
    responses(
        (status = 200, description = "Tabelas atualizadas", body = PricingTables),
        (status = 400, description = "Valores inválidos ou faixas fora de ordem"),
        (status = 409, description = "IDs repetidos em uma tabela")
    )
)]
pub async fn update_pricing(
    State(app_state): State<AppState>,
    Json(payload): Json<PricingTables>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tables = app_state.pricing_service.update_pricing(payload).await?;
    Ok((StatusCode::OK, Json(tables)))
}

// GET /api/settings/pricing/quote?area=&distance=
#[utoipa::path(
    get,
    path = "/api/settings/pricing/quote",
    tag = "Settings",
    params(QuoteQuery),
    responses((status = 200, description = "Preço de medição e adicional de deslocamento", body = PricingQuote))
)]
pub async fn get_pricing_quote(
    State(app_state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> Result<impl IntoResponse, AppError> {
    let quote = app_state.pricing_service.quote(query.area, query.distance).await;
    Ok((StatusCode::OK, Json(quote)))
}
