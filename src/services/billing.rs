// src/services/billing.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    models::{
        contract::Contract,
        installment::{InstallmentSlot, InstallmentStatus, PaymentInstallment, DOWN_PAYMENT_SLOT},
        progress::ProjectProgress,
        schedule::{ProjectSchedule, ProjectStageTemplateItem},
    },
    services::{calendar::add_months, progress::generate_project_progress, scheduling::build_schedule},
};

/// Registros derivados de um contrato recém-criado.
#[derive(Debug, Clone)]
pub struct DependentData {
    pub installments: Vec<PaymentInstallment>,
    pub schedule: ProjectSchedule,
    pub progress: ProjectProgress,
}

pub fn generate_dependent_data(
    contract: &Contract,
    template: &[ProjectStageTemplateItem],
    today: NaiveDate,
) -> DependentData {
    let installments = generate_installments(contract, &[]);
    let schedule = build_schedule(contract, template);
    let progress = generate_project_progress(&schedule, today);
    DependentData { installments, schedule, progress }
}

/// Gera o plano de parcelas do contrato.
///
/// `previous` são as parcelas já existentes do mesmo contrato. Uma parcela
/// nova que ocupa a mesma posição (`slot`) de uma anterior herda o id dela e,
/// se a anterior estava paga, também o status e a data de pagamento.
pub fn generate_installments(contract: &Contract, previous: &[PaymentInstallment]) -> Vec<PaymentInstallment> {
    let terms = &contract.terms;
    let mut installments = Vec::new();

    if terms.down_payment > Decimal::ZERO {
        let due_date = terms.down_payment_date.unwrap_or(terms.date);
        installments.push(slot_row(
            contract,
            previous,
            DOWN_PAYMENT_SLOT,
            due_date,
            terms.down_payment,
        ));
    }

    if let Some(first_date) = terms.first_installment_date {
        for i in 0..terms.installments {
            let slot = (i + 1) as InstallmentSlot;
            installments.push(slot_row(
                contract,
                previous,
                slot,
                add_months(first_date, i),
                terms.installment_value,
            ));
        }
    }

    installments
}

fn slot_row(
    contract: &Contract,
    previous: &[PaymentInstallment],
    slot: InstallmentSlot,
    due_date: NaiveDate,
    value: Decimal,
) -> PaymentInstallment {
    let existing = previous
        .iter()
        .find(|p| p.contract_id == contract.id && p.slot == slot);

    let (status, payment_date) = match existing {
        Some(p) if p.status.is_paid() => (p.status, p.payment_date),
        _ => (InstallmentStatus::Pendente, None),
    };

    PaymentInstallment {
        id: existing.map(|p| p.id).unwrap_or_else(Uuid::new_v4),
        contract_id: contract.id,
        client_name: contract.client_name.clone(),
        project_name: contract.project_name.clone(),
        slot,
        installment: PaymentInstallment::label_for(slot, contract.terms.installments),
        due_date,
        value,
        status,
        payment_date,
    }
}

/// Posições que existiam antes e sumiram do novo plano.
pub fn obsolete_slots(previous: &[PaymentInstallment], current: &[PaymentInstallment]) -> Vec<InstallmentSlot> {
    previous
        .iter()
        .map(|p| p.slot)
        .filter(|slot| !current.iter().any(|c| c.slot == *slot))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::contract::{ContractStatus, ContractTerms},
        services::scheduling::default_stage_template,
    };
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn contract(down_payment: i64, installments: u32, installment_value: i64) -> Contract {
        Contract {
            id: Uuid::new_v4(),
            client_name: "Maria Souza".into(),
            project_name: "Apartamento Jardins".into(),
            status: ContractStatus::Ativo,
            terms: ContractTerms {
                total_value: Decimal::from(down_payment + installments as i64 * installment_value),
                date: d(2024, 1, 1),
                duration_months: None,
                client_address: None,
                project_address: None,
                down_payment: Decimal::from(down_payment),
                down_payment_date: Some(d(2024, 1, 10)),
                installments,
                installment_value: Decimal::from(installment_value),
                first_installment_date: Some(d(2024, 2, 1)),
                service_type: None,
                services: vec![],
                discount_type: None,
                discount_value: Decimal::ZERO,
                mileage_distance: None,
                mileage_cost: None,
                tech_visits: None,
                attachments: vec![],
            },
        }
    }

    #[test]
    fn down_payment_plus_three_monthly_installments() {
        let c = contract(1000, 3, 500);
        let rows = generate_installments(&c, &[]);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].installment, "Entrada");
        assert_eq!(rows[0].value, Decimal::from(1000));
        assert_eq!(rows[0].status, InstallmentStatus::Pendente);
        assert_eq!(rows[0].due_date, d(2024, 1, 10));

        let monthly: Vec<_> = rows[1..].iter().map(|r| (r.installment.as_str(), r.due_date, r.value)).collect();
        assert_eq!(
            monthly,
            vec![
                ("1/3", d(2024, 2, 1), Decimal::from(500)),
                ("2/3", d(2024, 3, 1), Decimal::from(500)),
                ("3/3", d(2024, 4, 1), Decimal::from(500)),
            ]
        );
    }

    #[test]
    fn no_down_payment_row_when_amount_is_zero() {
        let rows = generate_installments(&contract(0, 2, 300), &[]);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.slot != DOWN_PAYMENT_SLOT));
    }

    #[test]
    fn no_monthly_rows_without_first_installment_date() {
        let mut c = contract(1000, 3, 500);
        c.terms.first_installment_date = None;
        let rows = generate_installments(&c, &[]);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn down_payment_without_date_is_due_on_contract_date() {
        let mut c = contract(1000, 0, 0);
        c.terms.down_payment_date = None;
        assert_eq!(generate_installments(&c, &[])[0].due_date, d(2024, 1, 1));
    }

    #[test]
    fn regeneration_keeps_paid_slots_and_ids() {
        let c = contract(1000, 3, 500);
        let mut previous = generate_installments(&c, &[]);
        previous[0].status = InstallmentStatus::Pago;
        previous[0].payment_date = Some(d(2024, 1, 9));
        previous[1].status = InstallmentStatus::PagoEmAtraso;
        previous[1].payment_date = Some(d(2024, 2, 5));

        // Passa de 3 para 4 parcelas: os rótulos mudam, a posição não.
        let mut edited = c.clone();
        edited.terms.installments = 4;
        let rows = generate_installments(&edited, &previous);

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].id, previous[0].id);
        assert_eq!(rows[0].status, InstallmentStatus::Pago);
        assert_eq!(rows[0].payment_date, Some(d(2024, 1, 9)));
        assert_eq!(rows[1].installment, "1/4");
        assert_eq!(rows[1].status, InstallmentStatus::PagoEmAtraso);
        assert_eq!(rows[1].payment_date, Some(d(2024, 2, 5)));
        assert_eq!(rows[2].status, InstallmentStatus::Pendente);
        assert_eq!(rows[2].id, previous[2].id);
        assert_eq!(rows[4].installment, "4/4");
    }

    #[test]
    fn regeneration_takes_new_terms_for_paid_rows() {
        let c = contract(1000, 1, 500);
        let mut previous = generate_installments(&c, &[]);
        previous[1].status = InstallmentStatus::Pago;
        previous[1].payment_date = Some(d(2024, 2, 1));

        let mut edited = c.clone();
        edited.terms.installment_value = Decimal::from(650);
        let rows = generate_installments(&edited, &previous);
        assert_eq!(rows[1].value, Decimal::from(650));
        assert!(rows[1].status.is_paid());
    }

    #[test]
    fn shrinking_the_plan_reports_obsolete_slots() {
        let c = contract(1000, 3, 500);
        let previous = generate_installments(&c, &[]);
        let mut edited = c.clone();
        edited.terms.installments = 1;
        edited.terms.down_payment = Decimal::ZERO;
        let current = generate_installments(&edited, &previous);
        assert_eq!(obsolete_slots(&previous, &current), vec![0, 2, 3]);
    }

    #[test]
    fn dependent_data_bundles_schedule_and_progress() {
        let c = contract(1000, 3, 500);
        let data = generate_dependent_data(&c, &default_stage_template(), d(2023, 12, 1));
        assert_eq!(data.installments.len(), 4);
        assert_eq!(data.schedule.contract_id, c.id);
        assert_eq!(data.schedule.start_date, d(2024, 1, 1));
        assert_eq!(data.progress.contract_id, c.id);
        assert_eq!(data.progress.stages.len(), 5);
    }
}
