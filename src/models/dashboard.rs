// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// 1. Resumo (os cards do topo)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub active_contracts: usize,
    pub total_contracted: Decimal,  // Soma do valor de todos os contratos ativos
    pub total_received: Decimal,    // Parcelas pagas
    pub total_receivable: Decimal,  // Parcelas pendentes
    pub total_overdue: Decimal,     // Pendentes com vencimento no passado
    pub projects_in_progress: usize,
    pub due_note_alerts: usize,
}

// 2. Faturamento mensal (gráfico de barras)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenueEntry {
    #[schema(example = 1)]
    pub month: u32,
    #[schema(example = "jan")]
    pub name: String,
    pub value: Decimal,
}

// 3. Projeções: esperado x recebido por mês
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionEntry {
    pub month: u32,
    pub name: String,
    pub expected: Decimal,
    pub received: Decimal,
}

// 4. Parcelas atrasadas
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LatePaymentEntry {
    pub installment_id: Uuid,
    pub contract_id: Uuid,
    pub client_name: String,
    pub project_name: String,
    pub installment: String,
    #[schema(value_type = String, format = Date)]
    pub due_date: NaiveDate,
    pub value: Decimal,
    pub days_overdue: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct YearQuery {
    /// Ano de referência; padrão é o ano corrente
    pub year: Option<i32>,
}
