// src/services/database_service.rs

use crate::{
    common::error::AppError,
    db::WriteOp,
    state::{AppData, DashboardState, DatabaseSnapshot},
};

/// Tela "Banco de Dados": exportação e zona de perigo.
#[derive(Clone)]
pub struct DatabaseService {
    state: DashboardState,
}

impl DatabaseService {
    pub fn new(state: DashboardState) -> Self {
        Self { state }
    }

    pub async fn export(&self) -> DatabaseSnapshot {
        self.state.snapshot().await.export()
    }

    /// Apaga tudo, local e remoto. Não tem volta.
    pub async fn reset(&self) -> Result<(), AppError> {
        self.state
            .commit(|data| {
                *data = AppData::default();
                Ok(((), vec![WriteOp::ResetAll]))
            })
            .await?;

        tracing::warn!("⚠️ Base de dados zerada");
        Ok(())
    }
}
