// src/services/other_payment_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::WriteOp,
    models::other_payment::{OtherPayment, OtherPaymentPayload},
    state::DashboardState,
};

/// Recebimentos avulsos. Somam no faturamento e nas projeções pelo dia em
/// que entraram.
#[derive(Clone)]
pub struct OtherPaymentService {
    state: DashboardState,
}

impl OtherPaymentService {
    pub fn new(state: DashboardState) -> Self {
        Self { state }
    }

    pub async fn list_other_payments(&self) -> Vec<OtherPayment> {
        let data = self.state.snapshot().await;
        let mut payments: Vec<_> = data.other_payments.values().cloned().collect();
        payments.sort_by(|a, b| b.date.cmp(&a.date));
        payments
    }

    pub async fn create_other_payment(&self, payload: OtherPaymentPayload) -> Result<OtherPayment, AppError> {
        let payment = self
            .state
            .commit(|data| {
                if let Some(contract_id) = payload.contract_id {
                    data.contract(contract_id)?;
                }
                let payment = OtherPayment {
                    id: Uuid::new_v4(),
                    contract_id: payload.contract_id,
                    description: payload.description.trim().to_string(),
                    value: payload.value,
                    date: payload.date,
                    created_at: Utc::now(),
                };
                data.other_payments.insert(payment.id, payment.clone());
                Ok((payment.clone(), vec![WriteOp::UpsertOtherPayment(payment)]))
            })
            .await?;

        tracing::info!(payment_id = %payment.id, value = %payment.value, "Recebimento avulso registrado");
        Ok(payment)
    }

    pub async fn update_other_payment(
        &self,
        id: Uuid,
        payload: OtherPaymentPayload,
    ) -> Result<OtherPayment, AppError> {
        self.state
            .commit(|data| {
                if let Some(contract_id) = payload.contract_id {
                    data.contract(contract_id)?;
                }
                let payment = data.other_payments.get_mut(&id).ok_or_else(|| not_found(id))?;
                payment.contract_id = payload.contract_id;
                payment.description = payload.description.trim().to_string();
                payment.value = payload.value;
                payment.date = payload.date;

                let payment = payment.clone();
                Ok((payment.clone(), vec![WriteOp::UpsertOtherPayment(payment)]))
            })
            .await
    }

    pub async fn delete_other_payment(&self, id: Uuid) -> Result<(), AppError> {
        self.state
            .commit(|data| {
                data.other_payments.remove(&id).ok_or_else(|| not_found(id))?;
                Ok(((), vec![WriteOp::DeleteOtherPayment(id)]))
            })
            .await
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::ResourceNotFound(format!("recebimento {}", id))
}
