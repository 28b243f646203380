// src/services/project_service.rs

use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::WriteOp,
    models::{
        progress::ProjectProgress,
        schedule::{ProjectSchedule, ProjectStage, ProjectStageTemplateItem, StageDefinition},
    },
    services::{
        calendar::today,
        progress::{default_project_progress, generate_project_progress},
        scheduling::recalculate_schedule_stages,
    },
    state::DashboardState,
};

/// Cronogramas, consolidação de progresso e o modelo de etapas.
#[derive(Clone)]
pub struct ProjectService {
    state: DashboardState,
}

impl ProjectService {
    pub fn new(state: DashboardState) -> Self {
        Self { state }
    }

    pub async fn list_schedules(&self) -> Vec<ProjectSchedule> {
        let data = self.state.snapshot().await;
        let mut schedules: Vec<_> = data.schedules.values().cloned().collect();
        schedules.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        schedules
    }

    pub async fn get_schedule(&self, contract_id: Uuid) -> Result<ProjectSchedule, AppError> {
        let data = self.state.snapshot().await;
        data.contract(contract_id)?;
        data.schedules
            .get(&contract_id)
            .cloned()
            .ok_or(AppError::ScheduleNotFound(contract_id))
    }

    /// Consolidação de todos os contratos, recalculada para a data de hoje.
    /// Contrato sem cronograma aparece com tudo pendente.
    pub async fn list_progress(&self) -> Vec<ProjectProgress> {
        let data = self.state.snapshot().await;
        let today = today();

        data.contracts
            .values()
            .map(|contract| match data.schedules.get(&contract.id) {
                Some(schedule) => generate_project_progress(schedule, today),
                None => default_project_progress(contract.id, &contract.project_name, &contract.client_name),
            })
            .collect()
    }

    pub async fn complete_stage(
        &self,
        contract_id: Uuid,
        stage_id: i32,
        completion_date: NaiveDate,
    ) -> Result<ProjectSchedule, AppError> {
        self.edit_stages(contract_id, |stages| {
            let stage = find_stage(stages, contract_id, stage_id)?;
            stage.completion_date = Some(completion_date);
            Ok(())
        })
        .await
    }

    pub async fn reopen_stage(&self, contract_id: Uuid, stage_id: i32) -> Result<ProjectSchedule, AppError> {
        self.edit_stages(contract_id, |stages| {
            find_stage(stages, contract_id, stage_id)?.completion_date = None;
            Ok(())
        })
        .await
    }

    /// Troca a sequência inteira de etapas. As datas são recalculadas a
    /// partir do início do projeto.
    pub async fn replace_stages(
        &self,
        contract_id: Uuid,
        definitions: Vec<StageDefinition>,
    ) -> Result<ProjectSchedule, AppError> {
        ensure_unique_ids(definitions.iter().map(|d| d.id))?;

        self.edit_stages(contract_id, |stages| {
            *stages = definitions
                .into_iter()
                .map(|def| ProjectStage {
                    id: def.id,
                    name: def.name.trim().to_string(),
                    duration_work_days: def.duration_work_days,
                    // Provisórias; o recálculo preenche
                    start_date: NaiveDate::MIN,
                    deadline: NaiveDate::MIN,
                    completion_date: def.completion_date,
                })
                .collect();
            Ok(())
        })
        .await
    }

    // Aplica a edição, recalcula as datas e regenera a consolidação.
    async fn edit_stages<F>(&self, contract_id: Uuid, edit: F) -> Result<ProjectSchedule, AppError>
    where
        F: FnOnce(&mut Vec<ProjectStage>) -> Result<(), AppError>,
    {
        let today = today();

        self.state
            .commit(|data| {
                data.contract(contract_id)?;
                let mut schedule = data
                    .schedules
                    .get(&contract_id)
                    .cloned()
                    .ok_or(AppError::ScheduleNotFound(contract_id))?;

                edit(&mut schedule.stages)?;
                schedule.stages = recalculate_schedule_stages(&schedule.stages, schedule.start_date);

                data.project_progress
                    .insert(contract_id, generate_project_progress(&schedule, today));
                data.schedules.insert(contract_id, schedule.clone());

                let op = WriteOp::SaveSchedule {
                    contract_id,
                    schedule: schedule.clone(),
                };
                Ok((schedule, vec![op]))
            })
            .await
    }

    pub async fn stage_template(&self) -> Vec<ProjectStageTemplateItem> {
        self.state.snapshot().await.project_stages_template.clone()
    }

    /// Novo modelo de etapas. Vale para os cronogramas montados daqui em
    /// diante; os existentes não mudam.
    pub async fn update_stage_template(
        &self,
        items: Vec<ProjectStageTemplateItem>,
    ) -> Result<Vec<ProjectStageTemplateItem>, AppError> {
        ensure_unique_ids(items.iter().map(|i| i.id))?;

        self.state
            .commit(|data| {
                data.project_stages_template = items.clone();
                Ok((items, vec![]))
            })
            .await
    }
}

fn find_stage(
    stages: &mut [ProjectStage],
    contract_id: Uuid,
    stage_id: i32,
) -> Result<&mut ProjectStage, AppError> {
    stages
        .iter_mut()
        .find(|s| s.id == stage_id)
        .ok_or(AppError::StageNotFound { contract_id, stage_id })
}

fn ensure_unique_ids(ids: impl IntoIterator<Item = i32>) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(AppError::InvalidState(format!("Etapa {} repetida", id)));
        }
    }
    Ok(())
}
