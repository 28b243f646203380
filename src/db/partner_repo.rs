// src/db/partner_repo.rs

use sqlx::{types::Json, Executor, FromRow, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::partner::{Partner, PartnerDetails},
};

#[derive(Debug, FromRow)]
struct PartnerRow {
    id: Uuid,
    name: String,
    #[sqlx(rename = "type")]
    partner_type: String,
    data: Json<PartnerDetails>,
}

impl From<PartnerRow> for Partner {
    fn from(row: PartnerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            partner_type: row.partner_type,
            details: row.data.0,
        }
    }
}

#[derive(Clone)]
pub struct PartnerRepository {
    pool: PgPool,
}

impl PartnerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Partner>, AppError> {
        let rows = sqlx::query_as::<_, PartnerRow>(
            "SELECT id, name, type, data FROM partners ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Partner::from).collect())
    }

    pub async fn upsert<'e, E>(&self, executor: E, partner: &Partner) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO partners (id, name, type, data)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                type = EXCLUDED.type,
                data = EXCLUDED.data
            "#,
        )
        .bind(partner.id)
        .bind(&partner.name)
        .bind(&partner.partner_type)
        .bind(Json(&partner.details))
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM partners WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }
}
