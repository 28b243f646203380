// src/services/visit_log_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::WriteOp,
    models::visit_log::{VisitLog, VisitLogPayload},
    state::DashboardState,
};

#[derive(Clone)]
pub struct VisitLogService {
    state: DashboardState,
}

impl VisitLogService {
    pub fn new(state: DashboardState) -> Self {
        Self { state }
    }

    pub async fn list_visit_logs(&self) -> Vec<VisitLog> {
        let data = self.state.snapshot().await;
        let mut logs: Vec<_> = data.visit_logs.values().cloned().collect();
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        logs
    }

    pub async fn visit_logs_of_contract(&self, contract_id: Uuid) -> Result<Vec<VisitLog>, AppError> {
        let data = self.state.snapshot().await;
        data.contract(contract_id)?;
        Ok(data.visit_logs_of(contract_id))
    }

    pub async fn create_visit_log(&self, payload: VisitLogPayload) -> Result<VisitLog, AppError> {
        self.state
            .commit(|data| {
                data.contract(payload.contract_id)?;
                let log = VisitLog {
                    id: Uuid::new_v4(),
                    contract_id: payload.contract_id,
                    date: payload.date,
                    notes: payload.notes,
                    created_at: Utc::now(),
                };
                data.visit_logs.insert(log.id, log.clone());
                Ok((log.clone(), vec![WriteOp::UpsertVisitLog(log)]))
            })
            .await
    }

    // A visita não muda de contrato
    pub async fn update_visit_log(&self, id: Uuid, payload: VisitLogPayload) -> Result<VisitLog, AppError> {
        self.state
            .commit(|data| {
                let log = data.visit_logs.get_mut(&id).ok_or_else(|| not_found(id))?;
                if log.contract_id != payload.contract_id {
                    return Err(AppError::InvalidState(
                        "A visita pertence a outro contrato".to_string(),
                    ));
                }
                log.date = payload.date;
                log.notes = payload.notes;

                let log = log.clone();
                Ok((log.clone(), vec![WriteOp::UpsertVisitLog(log)]))
            })
            .await
    }

    pub async fn delete_visit_log(&self, id: Uuid) -> Result<(), AppError> {
        self.state
            .commit(|data| {
                data.visit_logs.remove(&id).ok_or_else(|| not_found(id))?;
                Ok(((), vec![WriteOp::DeleteVisitLog(id)]))
            })
            .await
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::ResourceNotFound(format!("visita {}", id))
}
