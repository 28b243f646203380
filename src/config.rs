// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{MemoryStore, PgStore, RemoteStore, WriteBehind},
    services::{
        calendar::today, checklist_service::ChecklistService, contract_service::ContractService,
        database_service::DatabaseService, finance_service::FinanceService, note_service::NoteService,
        other_payment_service::OtherPaymentService, partner_service::PartnerService,
        pricing_service::PricingService, project_service::ProjectService,
        receipt_service::{ReceiptService, ReceiptSettings}, visit_log_service::VisitLogService,
    },
    state::{AppData, DashboardState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    // Volátil; some quando o processo termina
    Memory,
}

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub receipts: ReceiptSettings,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let storage_backend = match env::var("STORAGE_BACKEND").as_deref() {
            Ok("memory") => StorageBackend::Memory,
            Ok("postgres") | Err(_) => StorageBackend::Postgres,
            Ok(other) => anyhow::bail!("STORAGE_BACKEND inválido: {}", other),
        };

        let db_max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: {}", value))?,
            Err(_) => 5,
        };

        Ok(Self {
            storage_backend,
            database_url: env::var("DATABASE_URL").ok(),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            db_max_connections,
            receipts: ReceiptSettings {
                fonts_dir: env::var("FONTS_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("./fonts")),
                studio_name: env::var("STUDIO_NAME").unwrap_or_else(|_| "Estúdio de Interiores".to_string()),
                studio_document: env::var("STUDIO_DOCUMENT").ok(),
            },
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub dashboard: DashboardState,
    pub contract_service: ContractService,
    pub project_service: ProjectService,
    pub finance_service: FinanceService,
    pub partner_service: PartnerService,
    pub note_service: NoteService,
    pub visit_log_service: VisitLogService,
    pub checklist_service: ChecklistService,
    pub other_payment_service: OtherPaymentService,
    pub pricing_service: PricingService,
    pub receipt_service: ReceiptService,
    pub database_service: DatabaseService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let store: Arc<dyn RemoteStore> = match config.storage_backend {
            StorageBackend::Postgres => {
                let database_url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL deve ser definida")?;

                let db_pool = PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await?;
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                sqlx::migrate!().run(&db_pool).await?;
                tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

                Arc::new(PgStore::new(db_pool))
            }
            StorageBackend::Memory => {
                tracing::warn!("Usando armazenamento em memória; nada será persistido");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::with_store(store, config).await)
    }

    /// Carrega o agregado do armazenamento e monta os serviços.
    ///
    /// Falha na carga inicial não derruba o serviço: fica logada e o painel
    /// começa vazio.
    pub async fn with_store(store: Arc<dyn RemoteStore>, config: AppConfig) -> Self {
        let initial = match store.load_all().await {
            Ok(stored) => AppData::from_stored(stored, today()),
            Err(e) => {
                tracing::error!("🔥 Falha ao carregar os dados iniciais: {:?}", e);
                AppData::default()
            }
        };

        let dashboard = DashboardState::new(initial, WriteBehind::spawn(store));

        Self {
            contract_service: ContractService::new(dashboard.clone()),
            project_service: ProjectService::new(dashboard.clone()),
            finance_service: FinanceService::new(dashboard.clone()),
            partner_service: PartnerService::new(dashboard.clone()),
            note_service: NoteService::new(dashboard.clone()),
            visit_log_service: VisitLogService::new(dashboard.clone()),
            checklist_service: ChecklistService::new(dashboard.clone()),
            other_payment_service: OtherPaymentService::new(dashboard.clone()),
            pricing_service: PricingService::new(dashboard.clone()),
            receipt_service: ReceiptService::new(dashboard.clone(), config.receipts.clone()),
            database_service: DatabaseService::new(dashboard.clone()),
            dashboard,
            config: Arc::new(config),
        }
    }
}
