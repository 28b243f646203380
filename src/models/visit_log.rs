// src/models/visit_log.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::validation::not_blank;

// Registro de visita técnica à obra
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitLog {
    pub id: Uuid,
    pub contract_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2024-04-15")]
    pub date: NaiveDate,

    #[schema(example = "Conferência do gesso e pontos elétricos")]
    pub notes: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitLogPayload {
    pub contract_id: Uuid,

    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,

    #[validate(custom(function = "not_blank"))]
    pub notes: String,
}
