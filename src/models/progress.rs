// src/models/progress.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageProgress {
    #[schema(example = "Layout")]
    pub name: String,
    pub status: StageStatus,
}

// Visão resumida (Gantt) de um cronograma. Sempre derivada, nunca gravada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgress {
    pub contract_id: Uuid,
    pub project_name: String,
    pub client_name: String,
    pub stages: Vec<StageProgress>,
}
