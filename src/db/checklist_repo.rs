// src/db/checklist_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::checklist::ProjectChecklist};

#[derive(Clone)]
pub struct ChecklistRepository {
    pool: PgPool,
}

impl ChecklistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<ProjectChecklist>, AppError> {
        let checklists = sqlx::query_as::<_, ProjectChecklist>(
            "SELECT contract_id, completed_ids FROM checklists",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(checklists)
    }

    /// Um checklist por contrato: grava por cima do anterior.
    pub async fn upsert<'e, E>(&self, executor: E, checklist: &ProjectChecklist) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO checklists (contract_id, completed_ids)
            VALUES ($1, $2)
            ON CONFLICT (contract_id) DO UPDATE SET
                completed_ids = EXCLUDED.completed_ids,
                updated_at = NOW()
            "#,
        )
        .bind(checklist.contract_id)
        .bind(&checklist.completed_item_ids)
        .execute(executor)
        .await?;

        Ok(())
    }
}
