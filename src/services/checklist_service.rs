// src/services/checklist_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::WriteOp,
    models::checklist::ProjectChecklist,
    state::DashboardState,
};

#[derive(Clone)]
pub struct ChecklistService {
    state: DashboardState,
}

impl ChecklistService {
    pub fn new(state: DashboardState) -> Self {
        Self { state }
    }

    pub async fn list_checklists(&self) -> Vec<ProjectChecklist> {
        self.state.snapshot().await.checklists.values().cloned().collect()
    }

    /// Checklist do contrato; vazio se ainda não foi marcado nada.
    pub async fn get_checklist(&self, contract_id: Uuid) -> Result<ProjectChecklist, AppError> {
        let data = self.state.snapshot().await;
        data.contract(contract_id)?;
        Ok(data.checklists.get(&contract_id).cloned().unwrap_or(ProjectChecklist {
            contract_id,
            completed_item_ids: vec![],
        }))
    }

    pub async fn save_checklist(
        &self,
        contract_id: Uuid,
        mut completed_item_ids: Vec<String>,
    ) -> Result<ProjectChecklist, AppError> {
        completed_item_ids.sort();
        completed_item_ids.dedup();

        self.state
            .commit(|data| {
                data.contract(contract_id)?;
                let checklist = ProjectChecklist { contract_id, completed_item_ids };
                data.checklists.insert(contract_id, checklist.clone());
                Ok((checklist.clone(), vec![WriteOp::UpsertChecklist(checklist)]))
            })
            .await
    }
}
