// src/services/note_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::WriteOp,
    models::note::{Note, NotePayload},
    services::calendar::today,
    state::{AppData, DashboardState},
};

#[derive(Clone)]
pub struct NoteService {
    state: DashboardState,
}

// Nota ligada a contrato só aceita contrato que existe
fn check_contract(data: &AppData, contract_id: Option<Uuid>) -> Result<(), AppError> {
    match contract_id {
        Some(id) => data.contract(id).map(|_| ()),
        None => Ok(()),
    }
}

impl NoteService {
    pub fn new(state: DashboardState) -> Self {
        Self { state }
    }

    /// Notas mais recentes primeiro.
    pub async fn list_notes(&self) -> Vec<Note> {
        let data = self.state.snapshot().await;
        let mut notes: Vec<_> = data.notes.values().cloned().collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notes
    }

    /// Alertas vencidos e ainda abertos, do mais antigo para o mais novo.
    pub async fn due_alerts(&self) -> Vec<Note> {
        let data = self.state.snapshot().await;
        let today = today();
        let mut notes: Vec<_> = data
            .notes
            .values()
            .filter(|n| n.is_alert_due(today))
            .cloned()
            .collect();
        notes.sort_by_key(|n| n.alert_date);
        notes
    }

    pub async fn create_note(&self, payload: NotePayload) -> Result<Note, AppError> {
        self.state
            .commit(|data| {
                check_contract(data, payload.contract_id)?;
                let note = Note {
                    id: Uuid::new_v4(),
                    contract_id: payload.contract_id,
                    title: payload.title,
                    content: payload.content,
                    alert_date: payload.alert_date,
                    completed: payload.completed,
                    created_at: Utc::now(),
                };
                data.notes.insert(note.id, note.clone());
                Ok((note.clone(), vec![WriteOp::UpsertNote(note)]))
            })
            .await
    }

    pub async fn update_note(&self, id: Uuid, payload: NotePayload) -> Result<Note, AppError> {
        self.state
            .commit(|data| {
                check_contract(data, payload.contract_id)?;
                let note = data.notes.get_mut(&id).ok_or_else(|| not_found(id))?;
                note.contract_id = payload.contract_id;
                note.title = payload.title;
                note.content = payload.content;
                note.alert_date = payload.alert_date;
                note.completed = payload.completed;

                let note = note.clone();
                Ok((note.clone(), vec![WriteOp::UpsertNote(note)]))
            })
            .await
    }

    pub async fn delete_note(&self, id: Uuid) -> Result<(), AppError> {
        self.state
            .commit(|data| {
                data.notes.remove(&id).ok_or_else(|| not_found(id))?;
                Ok(((), vec![WriteOp::DeleteNote(id)]))
            })
            .await
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::ResourceNotFound(format!("nota {}", id))
}
