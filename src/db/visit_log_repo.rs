// src/db/visit_log_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::visit_log::VisitLog};

#[derive(Clone)]
pub struct VisitLogRepository {
    pool: PgPool,
}

impl VisitLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<VisitLog>, AppError> {
        let logs = sqlx::query_as::<_, VisitLog>(
            "SELECT id, contract_id, date, notes, created_at FROM visit_logs ORDER BY date DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    pub async fn upsert<'e, E>(&self, executor: E, log: &VisitLog) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO visit_logs (id, contract_id, date, notes, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                date = EXCLUDED.date,
                notes = EXCLUDED.notes
            "#,
        )
        .bind(log.id)
        .bind(log.contract_id)
        .bind(log.date)
        .bind(&log.notes)
        .bind(log.created_at)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM visit_logs WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }
}
