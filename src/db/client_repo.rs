// src/db/client_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::client::Client};

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Client>, AppError> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, logo_url FROM clients ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    /// O nome é único; se já existir um cliente com o mesmo nome, nada muda.
    pub async fn insert<'e, E>(&self, executor: E, client: &Client) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO clients (id, name, logo_url)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(client.id)
        .bind(&client.name)
        .bind(&client.logo_url)
        .execute(executor)
        .await?;

        Ok(())
    }
}
