// src/models/other_payment.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::validation::not_blank;

/// Recebimento fora do plano de parcelas (consultoria avulsa, visita extra,
/// reembolso de deslocamento...). Já entra como dinheiro recebido.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtherPayment {
    pub id: Uuid,

    // Opcional: pode ser um recebimento sem contrato
    pub contract_id: Option<Uuid>,

    #[schema(example = "Consultoria de cores")]
    pub description: String,

    #[schema(example = "450.00")]
    pub value: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-03-12")]
    pub date: NaiveDate,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtherPaymentPayload {
    pub contract_id: Option<Uuid>,

    #[validate(custom(function = "not_blank"))]
    pub description: String,

    #[validate(custom(function = "positive_amount"))]
    #[schema(example = "450.00")]
    pub value: Decimal,

    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
}

fn positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("must_be_positive"));
    }
    Ok(())
}
