// src/models/installment.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const DOWN_PAYMENT_LABEL: &str = "Entrada";

/// Posição da parcela dentro do plano do contrato. `0` é a entrada e `k` é a
/// k-ésima parcela mensal. Junto com o `contract_id` forma a chave estável
/// que sobrevive à regeneração das parcelas.
pub type InstallmentSlot = i32;

pub const DOWN_PAYMENT_SLOT: InstallmentSlot = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum InstallmentStatus {
    #[default]
    Pendente,
    Pago,
    #[serde(rename = "Pago em Atraso")]
    PagoEmAtraso,
}

impl InstallmentStatus {
    pub fn is_paid(&self) -> bool {
        matches!(self, InstallmentStatus::Pago | InstallmentStatus::PagoEmAtraso)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InstallmentStatus::Pendente => "Pendente",
            InstallmentStatus::Pago => "Pago",
            InstallmentStatus::PagoEmAtraso => "Pago em Atraso",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "Pendente" => InstallmentStatus::Pendente,
            "Pago em Atraso" => InstallmentStatus::PagoEmAtraso,
            // Qualquer outra variante "Pago..." gravada por versões antigas
            v if v.starts_with("Pago") => InstallmentStatus::Pago,
            _ => InstallmentStatus::Pendente,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInstallment {
    pub id: Uuid,
    pub contract_id: Uuid,

    #[schema(example = "Maria Souza")]
    pub client_name: String,

    #[schema(example = "Apartamento Jardins")]
    pub project_name: String,

    #[schema(example = 1)]
    pub slot: InstallmentSlot,

    // Rótulo exibido: "Entrada" ou "1/3"
    #[schema(example = "1/3")]
    pub installment: String,

    #[schema(value_type = String, format = Date, example = "2024-02-01")]
    pub due_date: NaiveDate,

    #[schema(example = "500.00")]
    pub value: Decimal,

    pub status: InstallmentStatus,

    #[schema(value_type = Option<String>, format = Date, example = "2024-02-03")]
    pub payment_date: Option<NaiveDate>,
}

impl PaymentInstallment {
    pub fn label_for(slot: InstallmentSlot, total: u32) -> String {
        if slot == DOWN_PAYMENT_SLOT {
            DOWN_PAYMENT_LABEL.to_string()
        } else {
            format!("{}/{}", slot, total)
        }
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.status.is_paid() && self.due_date < today
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_payment"))]
pub struct RecordPaymentPayload {
    pub status: InstallmentStatus,

    #[schema(value_type = Option<String>, format = Date, example = "2024-02-03")]
    pub payment_date: Option<NaiveDate>,
}

// Parcela paga precisa da data do pagamento
fn validate_payment(payload: &RecordPaymentPayload) -> Result<(), ValidationError> {
    if payload.status.is_paid() && payload.payment_date.is_none() {
        return Err(ValidationError::new("payment_date_required"));
    }
    Ok(())
}
