// src/handlers/database.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{common::error::AppError, config::AppState, state::DatabaseSnapshot};

// GET /api/database/snapshot
#[utoipa::path(
    get,
    path = "/api/database/snapshot",
    tag = "Database",
    responses((status = 200, description = "Exportação completa dos dados", body = DatabaseSnapshot))
)]
pub async fn export_snapshot(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let snapshot = app_state.database_service.export().await;
    Ok((StatusCode::OK, Json(snapshot)))
}

// DELETE /api/database
#[utoipa::path(
    delete,
    path = "/api/database",
    tag = "Database",
    responses((status = 204, description = "Todos os dados foram apagados"))
)]
pub async fn reset_database(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    app_state.database_service.reset().await?;
    Ok(StatusCode::NO_CONTENT)
}
