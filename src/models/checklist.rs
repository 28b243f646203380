// src/models/checklist.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Checklist de obra: quais itens já foram concluídos em um contrato.
/// Um por contrato.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectChecklist {
    pub contract_id: Uuid,

    #[sqlx(rename = "completed_ids")]
    #[schema(example = json!(["demolicao", "eletrica-1"]))]
    pub completed_item_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistPayload {
    #[serde(default)]
    pub completed_item_ids: Vec<String>,
}
