// src/models/contract.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{schedule::ProjectSchedule, validation::not_blank};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum ContractStatus {
    #[default]
    Ativo,
    #[serde(rename = "Concluído")]
    Concluido,
    Cancelado,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Ativo => "Ativo",
            ContractStatus::Concluido => "Concluído",
            ContractStatus::Cancelado => "Cancelado",
        }
    }

    /// Valores desconhecidos vindos do banco caem em `Ativo`.
    pub fn parse(value: &str) -> Self {
        match value {
            "Concluído" | "Concluido" => ContractStatus::Concluido,
            "Cancelado" => ContractStatus::Cancelado,
            _ => ContractStatus::Ativo,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

// --- Structs auxiliares ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContractServiceItem {
    #[schema(example = "Projeto de Interiores - Sala")]
    pub description: String,

    #[schema(example = "3500.00")]
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[schema(example = "contrato-assinado.pdf")]
    pub name: String,

    #[schema(example = "https://storage.studio.com/contrato-assinado.pdf")]
    pub url: String,
}

// --- Contrato ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "Maria Souza")]
    pub client_name: String,

    #[schema(example = "Apartamento Jardins")]
    pub project_name: String,

    pub status: ContractStatus,

    #[serde(flatten)]
    pub terms: ContractTerms,
}

/// Termos editáveis do contrato.
///
/// É o corpo do formulário de contrato e também o payload JSONB gravado na
/// coluna `data` da tabela `contracts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContractTerms {
    #[schema(example = "12000.00")]
    pub total_value: Decimal,

    // Data do contrato; também é o início nominal do cronograma
    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub date: NaiveDate,

    #[schema(example = 6)]
    pub duration_months: Option<i32>,

    pub client_address: Option<String>,
    pub project_address: Option<String>,

    #[serde(default)]
    #[schema(example = "1000.00")]
    pub down_payment: Decimal,

    #[schema(value_type = Option<String>, format = Date, example = "2024-01-05")]
    pub down_payment_date: Option<NaiveDate>,

    // Quantidade de parcelas mensais
    #[serde(default)]
    #[schema(example = 3)]
    pub installments: u32,

    #[serde(default)]
    #[schema(example = "500.00")]
    pub installment_value: Decimal,

    #[schema(value_type = Option<String>, format = Date, example = "2024-02-01")]
    pub first_installment_date: Option<NaiveDate>,

    #[schema(example = "Projeto Completo")]
    pub service_type: Option<String>,

    #[serde(default)]
    pub services: Vec<ContractServiceItem>,

    pub discount_type: Option<DiscountType>,

    #[serde(default)]
    #[schema(example = "0")]
    pub discount_value: Decimal,

    #[schema(example = "25.5")]
    pub mileage_distance: Option<Decimal>,

    #[schema(example = "40.00")]
    pub mileage_cost: Option<Decimal>,

    // Pacote de visitas técnicas, formato livre definido pelo formulário
    #[schema(value_type = Option<Object>)]
    pub tech_visits: Option<serde_json::Value>,

    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl ContractTerms {
    /// Soma dos serviços com o desconto aplicado.
    pub fn services_total(&self) -> Decimal {
        let gross: Decimal = self.services.iter().map(|s| s.value).sum();
        let discount = match self.discount_type {
            Some(DiscountType::Percentage) => gross * self.discount_value / Decimal::ONE_HUNDRED,
            Some(DiscountType::Fixed) => self.discount_value,
            None => Decimal::ZERO,
        };
        (gross - discount).max(Decimal::ZERO)
    }
}

/// O que a linha `contracts.data` guarda: os termos e o cronograma embutido.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractPayload {
    #[serde(flatten)]
    pub terms: ContractTerms,

    pub schedule: Option<ProjectSchedule>,
}

// --- Payload de entrada (formulário) ---

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_installment_plan"))]
pub struct ContractFormPayload {
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Maria Souza")]
    pub client_name: String,

    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Apartamento Jardins")]
    pub project_name: String,

    #[serde(default)]
    pub status: ContractStatus,

    #[schema(example = "12000.00")]
    pub total_value: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub date: NaiveDate,

    pub duration_months: Option<i32>,
    pub client_address: Option<String>,
    pub project_address: Option<String>,

    #[serde(default)]
    #[schema(example = "1000.00")]
    pub down_payment: Decimal,

    #[schema(value_type = Option<String>, format = Date, example = "2024-01-05")]
    pub down_payment_date: Option<NaiveDate>,

    #[validate(range(max = 240, message = "too_many_installments"))]
    #[serde(default)]
    #[schema(example = 3)]
    pub installments: u32,

    #[serde(default)]
    #[schema(example = "500.00")]
    pub installment_value: Decimal,

    #[schema(value_type = Option<String>, format = Date, example = "2024-02-01")]
    pub first_installment_date: Option<NaiveDate>,

    pub service_type: Option<String>,

    #[serde(default)]
    pub services: Vec<ContractServiceItem>,

    pub discount_type: Option<DiscountType>,

    #[serde(default)]
    pub discount_value: Decimal,

    pub mileage_distance: Option<Decimal>,
    pub mileage_cost: Option<Decimal>,

    #[schema(value_type = Option<Object>)]
    pub tech_visits: Option<serde_json::Value>,

    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

fn validate_installment_plan(payload: &ContractFormPayload) -> Result<(), ValidationError> {
    if payload.total_value < Decimal::ZERO
        || payload.down_payment < Decimal::ZERO
        || payload.installment_value < Decimal::ZERO
    {
        return Err(ValidationError::new("negative_amount"));
    }
    if payload.installments > 0 && payload.first_installment_date.is_none() {
        return Err(ValidationError::new("first_installment_date_required"));
    }
    Ok(())
}

impl ContractFormPayload {
    pub fn into_contract(self, id: Uuid) -> Contract {
        Contract {
            id,
            client_name: self.client_name.trim().to_string(),
            project_name: self.project_name.trim().to_string(),
            status: self.status,
            terms: ContractTerms {
                total_value: self.total_value,
                date: self.date,
                duration_months: self.duration_months,
                client_address: self.client_address,
                project_address: self.project_address,
                down_payment: self.down_payment,
                down_payment_date: self.down_payment_date,
                installments: self.installments,
                installment_value: self.installment_value,
                first_installment_date: self.first_installment_date,
                service_type: self.service_type,
                services: self.services,
                discount_type: self.discount_type,
                discount_value: self.discount_value,
                mileage_distance: self.mileage_distance,
                mileage_cost: self.mileage_cost,
                tech_visits: self.tech_visits,
                attachments: self.attachments,
            },
        }
    }
}
