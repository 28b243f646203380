// src/models/note.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::validation::not_blank;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,

    // Notas podem ser soltas ou ligadas a um contrato
    pub contract_id: Option<Uuid>,

    #[schema(example = "Ligar para o fornecedor de piso")]
    pub title: String,

    pub content: String,

    #[schema(value_type = Option<String>, format = Date, example = "2024-03-10")]
    pub alert_date: Option<NaiveDate>,

    pub completed: bool,

    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Alerta vencido e ainda não resolvido.
    pub fn is_alert_due(&self, today: NaiveDate) -> bool {
        !self.completed && self.alert_date.is_some_and(|d| d <= today)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotePayload {
    pub contract_id: Option<Uuid>,

    #[validate(custom(function = "not_blank"))]
    pub title: String,

    #[serde(default)]
    pub content: String,

    #[schema(value_type = Option<String>, format = Date)]
    pub alert_date: Option<NaiveDate>,

    #[serde(default)]
    pub completed: bool,
}
