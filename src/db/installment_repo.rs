// src/db/installment_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, FromRow, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::installment::{InstallmentSlot, InstallmentStatus, PaymentInstallment},
};

#[derive(Debug, FromRow)]
struct InstallmentRow {
    id: Uuid,
    contract_id: Uuid,
    client_name: String,
    project_name: String,
    slot: i32,
    installment: String,
    due_date: NaiveDate,
    value: Decimal,
    status: String,
    payment_date: Option<NaiveDate>,
}

impl From<InstallmentRow> for PaymentInstallment {
    fn from(row: InstallmentRow) -> Self {
        Self {
            id: row.id,
            contract_id: row.contract_id,
            client_name: row.client_name,
            project_name: row.project_name,
            slot: row.slot,
            installment: row.installment,
            due_date: row.due_date,
            value: row.value,
            status: InstallmentStatus::parse(&row.status),
            payment_date: row.payment_date,
        }
    }
}

#[derive(Clone)]
pub struct InstallmentRepository {
    pool: PgPool,
}

impl InstallmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<PaymentInstallment>, AppError> {
        let rows = sqlx::query_as::<_, InstallmentRow>(
            r#"
            SELECT id, contract_id, client_name, project_name, slot, installment,
                   due_date, value, status, payment_date
            FROM installments
            ORDER BY contract_id, slot
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PaymentInstallment::from).collect())
    }

    /// Grava a parcela pela chave (contrato, posição).
    pub async fn upsert<'e, E>(&self, executor: E, installment: &PaymentInstallment) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO installments (
                id, contract_id, client_name, project_name, slot, installment,
                due_date, value, status, payment_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (contract_id, slot) DO UPDATE SET
                client_name = EXCLUDED.client_name,
                project_name = EXCLUDED.project_name,
                installment = EXCLUDED.installment,
                due_date = EXCLUDED.due_date,
                value = EXCLUDED.value,
                status = EXCLUDED.status,
                payment_date = EXCLUDED.payment_date
            "#,
        )
        .bind(installment.id)
        .bind(installment.contract_id)
        .bind(&installment.client_name)
        .bind(&installment.project_name)
        .bind(installment.slot)
        .bind(&installment.installment)
        .bind(installment.due_date)
        .bind(installment.value)
        .bind(installment.status.as_str())
        .bind(installment.payment_date)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn delete_slots<'e, E>(
        &self,
        executor: E,
        contract_id: Uuid,
        slots: &[InstallmentSlot],
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM installments WHERE contract_id = $1 AND slot = ANY($2)")
            .bind(contract_id)
            .bind(slots)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn update_payment<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: InstallmentStatus,
        payment_date: Option<NaiveDate>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE installments SET status = $2, payment_date = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(status.as_str())
        .bind(payment_date)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::InstallmentNotFound(id));
        }
        Ok(())
    }
}
