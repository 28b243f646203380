// src/services/finance_service.rs

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::WriteOp,
    models::{
        contract::ContractStatus,
        dashboard::{DashboardSummary, LatePaymentEntry, MonthlyRevenueEntry, ProjectionEntry},
        installment::{InstallmentStatus, PaymentInstallment, RecordPaymentPayload},
        progress::StageStatus,
    },
    services::{calendar::today, progress::generate_project_progress},
    state::{AppData, DashboardState},
};

/// Rótulos curtos dos meses, como aparecem nos gráficos.
pub const MONTH_NAMES: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

#[derive(Clone)]
pub struct FinanceService {
    state: DashboardState,
}

impl FinanceService {
    pub fn new(state: DashboardState) -> Self {
        Self { state }
    }

    /// Todas as parcelas, por vencimento.
    pub async fn list_installments(&self) -> Vec<PaymentInstallment> {
        let data = self.state.snapshot().await;
        let mut installments: Vec<_> = data.installments.values().cloned().collect();
        installments.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.slot.cmp(&b.slot)));
        installments
    }

    pub async fn installments_of_contract(&self, contract_id: Uuid) -> Result<Vec<PaymentInstallment>, AppError> {
        let data = self.state.snapshot().await;
        data.contract(contract_id)?;
        Ok(data.installments_of(contract_id))
    }

    pub async fn get_installment(&self, id: Uuid) -> Result<PaymentInstallment, AppError> {
        let data = self.state.snapshot().await;
        data.installments
            .get(&id)
            .cloned()
            .ok_or(AppError::InstallmentNotFound(id))
    }

    /// Marca a parcela como paga (no prazo ou em atraso) ou volta para
    /// pendente, limpando a data do pagamento.
    pub async fn record_payment(
        &self,
        id: Uuid,
        payload: RecordPaymentPayload,
    ) -> Result<PaymentInstallment, AppError> {
        let installment = self
            .state
            .commit(|data| {
                let installment = data
                    .installments
                    .get_mut(&id)
                    .ok_or(AppError::InstallmentNotFound(id))?;

                installment.status = payload.status;
                installment.payment_date = match payload.status {
                    InstallmentStatus::Pendente => None,
                    _ => payload.payment_date,
                };

                let updated = installment.clone();
                Ok((updated.clone(), vec![WriteOp::SaveInstallmentPayment(updated)]))
            })
            .await?;

        tracing::info!(
            installment_id = %installment.id,
            status = installment.status.as_str(),
            "Pagamento registrado"
        );
        Ok(installment)
    }

    pub async fn monthly_revenue(&self, year: Option<i32>) -> Vec<MonthlyRevenueEntry> {
        let data = self.state.snapshot().await;
        monthly_revenue(&data, year.unwrap_or_else(|| today().year()))
    }

    pub async fn late_payments(&self) -> Vec<LatePaymentEntry> {
        let data = self.state.snapshot().await;
        late_payments(&data, today())
    }

    pub async fn projections(&self, year: Option<i32>) -> Vec<ProjectionEntry> {
        let data = self.state.snapshot().await;
        projections(&data, year.unwrap_or_else(|| today().year()))
    }

    pub async fn summary(&self) -> DashboardSummary {
        let data = self.state.snapshot().await;
        summary(&data, today())
    }
}

fn month_index(date: NaiveDate) -> usize {
    date.month0() as usize
}

/// Recebimentos avulsos do ano somados ao mês de entrada.
fn add_other_payments(data: &AppData, year: i32, totals: &mut [Decimal; 12]) {
    for payment in data.other_payments.values().filter(|p| p.date.year() == year) {
        totals[month_index(payment.date)] += payment.value;
    }
}

/// Soma das parcelas pagas no ano, pelo mês do pagamento, mais os
/// recebimentos avulsos.
pub fn monthly_revenue(data: &AppData, year: i32) -> Vec<MonthlyRevenueEntry> {
    let mut totals = [Decimal::ZERO; 12];

    for installment in data.installments.values() {
        if !installment.status.is_paid() {
            continue;
        }
        if let Some(paid_on) = installment.payment_date.filter(|d| d.year() == year) {
            totals[month_index(paid_on)] += installment.value;
        }
    }
    add_other_payments(data, year, &mut totals);

    MONTH_NAMES
        .iter()
        .zip(totals)
        .enumerate()
        .map(|(i, (name, value))| MonthlyRevenueEntry {
            month: i as u32 + 1,
            name: name.to_string(),
            value,
        })
        .collect()
}

/// Pendentes vencidas, da mais atrasada para a mais recente.
pub fn late_payments(data: &AppData, today: NaiveDate) -> Vec<LatePaymentEntry> {
    let mut late: Vec<_> = data
        .installments
        .values()
        .filter(|i| i.is_overdue(today))
        .map(|i| LatePaymentEntry {
            installment_id: i.id,
            contract_id: i.contract_id,
            client_name: i.client_name.clone(),
            project_name: i.project_name.clone(),
            installment: i.installment.clone(),
            due_date: i.due_date,
            value: i.value,
            days_overdue: (today - i.due_date).num_days(),
        })
        .collect();

    late.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue));
    late
}

/// Por mês: quanto ainda se espera receber (pendentes pelo vencimento) e
/// quanto já entrou (pagas pelo mês do pagamento).
pub fn projections(data: &AppData, year: i32) -> Vec<ProjectionEntry> {
    let mut expected = [Decimal::ZERO; 12];
    let mut received = [Decimal::ZERO; 12];

    for installment in data.installments.values() {
        match installment.payment_date {
            Some(paid_on) if installment.status.is_paid() => {
                if paid_on.year() == year {
                    received[month_index(paid_on)] += installment.value;
                }
            }
            _ if !installment.status.is_paid() && installment.due_date.year() == year => {
                expected[month_index(installment.due_date)] += installment.value;
            }
            _ => {}
        }
    }
    add_other_payments(data, year, &mut received);

    (0..12)
        .map(|i| ProjectionEntry {
            month: i as u32 + 1,
            name: MONTH_NAMES[i].to_string(),
            expected: expected[i],
            received: received[i],
        })
        .collect()
}

pub fn summary(data: &AppData, today: NaiveDate) -> DashboardSummary {
    let active: Vec<_> = data
        .contracts
        .values()
        .filter(|c| c.status == ContractStatus::Ativo)
        .collect();

    let (mut received, mut receivable, mut overdue) = (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
    for installment in data.installments.values() {
        if installment.status.is_paid() {
            received += installment.value;
        } else {
            receivable += installment.value;
            if installment.is_overdue(today) {
                overdue += installment.value;
            }
        }
    }
    received += data.other_payments.values().map(|p| p.value).sum::<Decimal>();

    let projects_in_progress = active
        .iter()
        .filter_map(|c| data.schedules.get(&c.id))
        .map(|s| generate_project_progress(s, today))
        .filter(|p| {
            let done = p.stages.iter().all(|s| s.status == StageStatus::Completed);
            let started = p.stages.iter().any(|s| s.status != StageStatus::Pending);
            started && !done
        })
        .count();

    DashboardSummary {
        active_contracts: active.len(),
        total_contracted: active.iter().map(|c| c.terms.total_value).sum(),
        total_received: received,
        total_receivable: receivable,
        total_overdue: overdue,
        projects_in_progress,
        due_note_alerts: data.notes.values().filter(|n| n.is_alert_due(today)).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        contract::{Contract, ContractTerms},
        note::Note,
        other_payment::OtherPayment,
    };
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn installment(
        value: i64,
        due_date: NaiveDate,
        status: InstallmentStatus,
        payment_date: Option<NaiveDate>,
    ) -> PaymentInstallment {
        PaymentInstallment {
            id: Uuid::new_v4(),
            contract_id: Uuid::nil(),
            client_name: "Ana".into(),
            project_name: "Casa de Campo".into(),
            slot: 1,
            installment: "1/1".into(),
            due_date,
            value: Decimal::from(value),
            status,
            payment_date,
        }
    }

    fn data_with(installments: Vec<PaymentInstallment>) -> AppData {
        let mut data = AppData::default();
        for i in installments {
            data.installments.insert(i.id, i);
        }
        data
    }

    #[test]
    fn revenue_goes_to_the_payment_month() {
        let data = data_with(vec![
            installment(500, d(2024, 1, 10), InstallmentStatus::Pago, Some(d(2024, 2, 3))),
            installment(300, d(2024, 2, 10), InstallmentStatus::PagoEmAtraso, Some(d(2024, 2, 20))),
            installment(700, d(2024, 3, 10), InstallmentStatus::Pendente, None),
            // Outro ano
            installment(900, d(2023, 12, 10), InstallmentStatus::Pago, Some(d(2023, 12, 11))),
        ]);

        let revenue = monthly_revenue(&data, 2024);
        assert_eq!(revenue.len(), 12);
        assert_eq!(revenue[0].value, Decimal::ZERO);
        assert_eq!(revenue[1].name, "fev");
        assert_eq!(revenue[1].value, Decimal::from(800));
        assert_eq!(revenue.iter().map(|m| m.value).sum::<Decimal>(), Decimal::from(800));
    }

    fn other_payment(value: i64, date: NaiveDate) -> OtherPayment {
        OtherPayment {
            id: Uuid::new_v4(),
            contract_id: None,
            description: "Consultoria avulsa".into(),
            value: Decimal::from(value),
            date,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn other_payments_count_as_received_money() {
        let mut data = data_with(vec![installment(
            500,
            d(2024, 2, 1),
            InstallmentStatus::Pago,
            Some(d(2024, 2, 3)),
        )]);
        for p in [other_payment(150, d(2024, 2, 20)), other_payment(80, d(2023, 5, 1))] {
            data.other_payments.insert(p.id, p);
        }

        assert_eq!(monthly_revenue(&data, 2024)[1].value, Decimal::from(650));
        assert_eq!(monthly_revenue(&data, 2023)[4].value, Decimal::from(80));
        assert_eq!(projections(&data, 2024)[1].received, Decimal::from(650));
        assert_eq!(summary(&data, d(2024, 3, 1)).total_received, Decimal::from(730));
    }

    #[test]
    fn late_payments_only_include_pending_rows_past_due() {
        let data = data_with(vec![
            installment(100, d(2024, 1, 1), InstallmentStatus::Pendente, None),
            installment(200, d(2024, 1, 20), InstallmentStatus::Pendente, None),
            installment(300, d(2024, 1, 1), InstallmentStatus::Pago, Some(d(2024, 1, 1))),
            installment(400, d(2024, 2, 1), InstallmentStatus::Pendente, None),
        ]);

        let late = late_payments(&data, d(2024, 2, 1));
        let days: Vec<_> = late.iter().map(|l| l.days_overdue).collect();
        assert_eq!(days, vec![31, 12]);
    }

    #[test]
    fn projections_split_expected_and_received() {
        let data = data_with(vec![
            installment(100, d(2024, 3, 5), InstallmentStatus::Pendente, None),
            installment(250, d(2024, 3, 5), InstallmentStatus::Pago, Some(d(2024, 4, 1))),
        ]);

        let months = projections(&data, 2024);
        assert_eq!(months[2].expected, Decimal::from(100));
        assert_eq!(months[2].received, Decimal::ZERO);
        assert_eq!(months[3].received, Decimal::from(250));
    }

    #[test]
    fn summary_counts_active_contracts_and_due_alerts() {
        let mut data = data_with(vec![
            installment(100, d(2024, 1, 1), InstallmentStatus::Pendente, None),
            installment(400, d(2024, 1, 1), InstallmentStatus::Pago, Some(d(2024, 1, 2))),
        ]);
        for (status, total) in [(ContractStatus::Ativo, 5000), (ContractStatus::Cancelado, 9000)] {
            let contract = Contract {
                id: Uuid::new_v4(),
                client_name: "Ana".into(),
                project_name: "Casa".into(),
                status,
                terms: ContractTerms {
                    total_value: Decimal::from(total),
                    date: d(2024, 1, 1),
                    duration_months: None,
                    client_address: None,
                    project_address: None,
                    down_payment: Decimal::ZERO,
                    down_payment_date: None,
                    installments: 0,
                    installment_value: Decimal::ZERO,
                    first_installment_date: None,
                    service_type: None,
                    services: vec![],
                    discount_type: None,
                    discount_value: Decimal::ZERO,
                    mileage_distance: None,
                    mileage_cost: None,
                    tech_visits: None,
                    attachments: vec![],
                },
            };
            data.contracts.insert(contract.id, contract);
        }
        let note = Note {
            id: Uuid::new_v4(),
            contract_id: None,
            title: "Cobrar".into(),
            content: String::new(),
            alert_date: Some(d(2024, 1, 15)),
            completed: false,
            created_at: Utc::now(),
        };
        data.notes.insert(note.id, note);

        let s = summary(&data, d(2024, 2, 1));
        assert_eq!(s.active_contracts, 1);
        assert_eq!(s.total_contracted, Decimal::from(5000));
        assert_eq!(s.total_received, Decimal::from(400));
        assert_eq!(s.total_receivable, Decimal::from(100));
        assert_eq!(s.total_overdue, Decimal::from(100));
        assert_eq!(s.due_note_alerts, 1);
    }
}
