// src/models/schedule.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::validation::not_blank;

/// Uma linha do modelo de etapas usado para montar novos cronogramas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStageTemplateItem {
    #[schema(example = 1)]
    pub id: i32,

    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Reunião de Briefing")]
    pub name: String,

    // Teto de cerca de dois anos de dias úteis
    #[validate(range(max = 500, message = "duration_too_long"))]
    #[schema(example = 5)]
    pub duration_work_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStage {
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = "Reunião de Briefing")]
    pub name: String,

    #[schema(example = 5)]
    pub duration_work_days: u32,

    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub start_date: NaiveDate,

    #[schema(value_type = String, format = Date, example = "2024-01-05")]
    pub deadline: NaiveDate,

    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date, example = "2024-01-04")]
    pub completion_date: Option<NaiveDate>,
}

impl ProjectStage {
    /// Data em que a etapa efetivamente terminou (ou deve terminar).
    pub fn effective_end(&self) -> NaiveDate {
        self.completion_date.unwrap_or(self.deadline)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSchedule {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub client_name: String,
    pub project_name: String,

    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub start_date: NaiveDate,

    pub stages: Vec<ProjectStage>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageCompletionPayload {
    #[schema(value_type = String, format = Date, example = "2024-01-04")]
    pub completion_date: NaiveDate,
}

/// Substitui a sequência de etapas de um cronograma (reordenar, renomear,
/// mudar durações). Datas são sempre recalculadas no servidor.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceStagesPayload {
    #[validate(length(min = 1, message = "required"), nested)]
    pub stages: Vec<StageDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageDefinition {
    pub id: i32,

    #[validate(custom(function = "not_blank"))]
    pub name: String,

    #[validate(range(max = 500, message = "duration_too_long"))]
    pub duration_work_days: u32,

    #[schema(value_type = Option<String>, format = Date)]
    pub completion_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageTemplatePayload {
    #[validate(length(min = 1, message = "required"), nested)]
    pub stages: Vec<ProjectStageTemplateItem>,
}
