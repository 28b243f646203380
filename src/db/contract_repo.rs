// src/db/contract_repo.rs

use sqlx::{types::Json, Executor, FromRow, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        contract::{Contract, ContractPayload, ContractStatus},
        schedule::ProjectSchedule,
    },
};

// Linha da tabela `contracts`. Os termos e o cronograma ficam em `data`.
#[derive(Debug, FromRow)]
struct ContractRow {
    id: Uuid,
    client_name: String,
    project_name: String,
    status: String,
    data: Json<ContractPayload>,
}

impl ContractRow {
    fn into_parts(self) -> (Contract, Option<ProjectSchedule>) {
        let Json(payload) = self.data;
        let contract = Contract {
            id: self.id,
            client_name: self.client_name,
            project_name: self.project_name,
            status: ContractStatus::parse(&self.status),
            terms: payload.terms,
        };
        (contract, payload.schedule)
    }
}

#[derive(Clone)]
pub struct ContractRepository {
    pool: PgPool,
}

impl ContractRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<(Contract, Option<ProjectSchedule>)>, AppError> {
        let rows = sqlx::query_as::<_, ContractRow>(
            r#"
            SELECT id, client_name, project_name, status, data
            FROM contracts
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ContractRow::into_parts).collect())
    }

    pub async fn upsert<'e, E>(
        &self,
        executor: E,
        contract: &Contract,
        schedule: &ProjectSchedule,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payload = ContractPayload {
            terms: contract.terms.clone(),
            schedule: Some(schedule.clone()),
        };

        sqlx::query(
            r#"
            INSERT INTO contracts (id, client_name, project_name, status, data)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                client_name = EXCLUDED.client_name,
                project_name = EXCLUDED.project_name,
                status = EXCLUDED.status,
                data = EXCLUDED.data,
                updated_at = NOW()
            "#,
        )
        .bind(contract.id)
        .bind(&contract.client_name)
        .bind(&contract.project_name)
        .bind(contract.status.as_str())
        .bind(Json(payload))
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Troca só o cronograma embutido no JSON do contrato.
    pub async fn save_schedule<'e, E>(
        &self,
        executor: E,
        contract_id: Uuid,
        schedule: &ProjectSchedule,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE contracts
            SET data = jsonb_set(data, '{schedule}', $2, true), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(contract_id)
        .bind(Json(schedule))
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ContractNotFound(contract_id));
        }
        Ok(())
    }

    // Parcelas, checklist, visitas e notas vão junto (ON DELETE CASCADE)
    pub async fn delete<'e, E>(&self, executor: E, contract_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(contract_id)
            .execute(executor)
            .await?;

        Ok(())
    }
}
