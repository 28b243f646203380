// src/handlers/notes.rs

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
    models::note::{Note, NotePayload},
};

// GET /api/notes
#[utoipa::path(
    get,
    path = "/api/notes",
    tag = "Notes",
    responses((status = 200, description = "Notas, mais recentes primeiro", body = Vec<Note>))
)]
pub async fn list_notes(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let notes = app_state.note_service.list_notes().await;
    Ok((StatusCode::OK, Json(notes)))
}

// GET /api/notes/alerts
#[utoipa::path(
    get,
    path = "/api/notes/alerts",
    tag = "Notes",
    responses((status = 200, description = "Alertas vencidos e não concluídos", body = Vec<Note>))
)]
pub async fn list_due_alerts(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let notes = app_state.note_service.due_alerts().await;
    Ok((StatusCode::OK, Json(notes)))
}

// POST /api/notes
#[utoipa::path(
    post,
    path = "/api/notes",
    tag = "Notes",
    request_body = NotePayload,
    responses(
        (status = 201, description = "Nota criada", body = Note),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Contrato informado não existe")
    )
)]
pub async fn create_note(
    State(app_state): State<AppState>,
    Json(payload): Json<NotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let note = app_state.note_service.create_note(payload).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

// PUT /api/notes/{id}
#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    tag = "Notes",
    request_body = NotePayload,
    params(("id" = Uuid, Path, description = "ID da nota")),
    responses(
        (status = 200, description = "Nota atualizada", body = Note),
        (status = 404, description = "Nota não encontrada")
    )
)]
pub async fn update_note(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let note = app_state.note_service.update_note(id, payload).await?;
    Ok((StatusCode::OK, Json(note)))
}

// DELETE /api/notes/{id}
#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    tag = "Notes",
    params(("id" = Uuid, Path, description = "ID da nota")),
    responses(
        (status = 204, description = "Nota removida"),
        (status = 404, description = "Nota não encontrada")
    )
)]
pub async fn delete_note(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.note_service.delete_note(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
