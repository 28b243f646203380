// src/db/other_payment_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::other_payment::OtherPayment};

#[derive(Clone)]
pub struct OtherPaymentRepository {
    pool: PgPool,
}

impl OtherPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<OtherPayment>, AppError> {
        let payments = sqlx::query_as::<_, OtherPayment>(
            r#"
            SELECT id, contract_id, description, value, date, created_at
            FROM other_payments
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn upsert<'e, E>(&self, executor: E, payment: &OtherPayment) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO other_payments (id, contract_id, description, value, date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                contract_id = EXCLUDED.contract_id,
                description = EXCLUDED.description,
                value = EXCLUDED.value,
                date = EXCLUDED.date
            "#,
        )
        .bind(payment.id)
        .bind(payment.contract_id)
        .bind(&payment.description)
        .bind(payment.value)
        .bind(payment.date)
        .bind(payment.created_at)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM other_payments WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }
}
