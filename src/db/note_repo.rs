// src/db/note_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::note::Note};

#[derive(Clone)]
pub struct NoteRepository {
    pool: PgPool,
}

impl NoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Note>, AppError> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, contract_id, title, content, alert_date, completed, created_at
            FROM notes
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }

    pub async fn upsert<'e, E>(&self, executor: E, note: &Note) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO notes (id, contract_id, title, content, alert_date, completed, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                contract_id = EXCLUDED.contract_id,
                title = EXCLUDED.title,
                content = EXCLUDED.content,
                alert_date = EXCLUDED.alert_date,
                completed = EXCLUDED.completed
            "#,
        )
        .bind(note.id)
        .bind(note.contract_id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.alert_date)
        .bind(note.completed)
        .bind(note.created_at)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }
}
