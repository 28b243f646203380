// src/db/pg_store.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{
        persistence::{RemoteStore, StoredData, WriteOp},
        ChecklistRepository, ClientRepository, ContractRepository, InstallmentRepository,
        NoteRepository, OtherPaymentRepository, PartnerRepository, VisitLogRepository,
    },
};

/// Armazenamento em Postgres. Cada `WriteOp` roda numa transação.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    clients: ClientRepository,
    contracts: ContractRepository,
    installments: InstallmentRepository,
    checklists: ChecklistRepository,
    partners: PartnerRepository,
    notes: NoteRepository,
    visit_logs: VisitLogRepository,
    other_payments: OtherPaymentRepository,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            clients: ClientRepository::new(pool.clone()),
            contracts: ContractRepository::new(pool.clone()),
            installments: InstallmentRepository::new(pool.clone()),
            checklists: ChecklistRepository::new(pool.clone()),
            partners: PartnerRepository::new(pool.clone()),
            notes: NoteRepository::new(pool.clone()),
            visit_logs: VisitLogRepository::new(pool.clone()),
            other_payments: OtherPaymentRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl RemoteStore for PgStore {
    async fn load_all(&self) -> Result<StoredData, AppError> {
        let (clients, contracts, installments, checklists, partners, notes, visit_logs, other_payments) = tokio::try_join!(
            self.clients.list_all(),
            self.contracts.list_all(),
            self.installments.list_all(),
            self.checklists.list_all(),
            self.partners.list_all(),
            self.notes.list_all(),
            self.visit_logs.list_all(),
            self.other_payments.list_all(),
        )?;

        tracing::info!(
            contracts = contracts.len(),
            installments = installments.len(),
            "📦 Dados carregados do banco"
        );

        Ok(StoredData {
            clients,
            contracts,
            installments,
            checklists,
            partners,
            notes,
            visit_logs,
            other_payments,
        })
    }

    async fn apply(&self, op: &WriteOp) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        match op {
            WriteOp::SaveContract {
                new_client,
                contract,
                schedule,
                installments,
                obsolete_slots,
            } => {
                if let Some(client) = new_client {
                    self.clients.insert(&mut *tx, client).await?;
                }
                self.contracts.upsert(&mut *tx, contract, schedule).await?;
                if !obsolete_slots.is_empty() {
                    self.installments
                        .delete_slots(&mut *tx, contract.id, obsolete_slots)
                        .await?;
                }
                for installment in installments {
                    self.installments.upsert(&mut *tx, installment).await?;
                }
            }
            WriteOp::DeleteContract { contract_id } => {
                self.contracts.delete(&mut *tx, *contract_id).await?;
            }
            WriteOp::SaveSchedule { contract_id, schedule } => {
                self.contracts
                    .save_schedule(&mut *tx, *contract_id, schedule)
                    .await?;
            }
            WriteOp::SaveInstallmentPayment(installment) => {
                self.installments
                    .update_payment(&mut *tx, installment.id, installment.status, installment.payment_date)
                    .await?;
            }
            WriteOp::UpsertPartner(partner) => self.partners.upsert(&mut *tx, partner).await?,
            WriteOp::DeletePartner(id) => self.partners.delete(&mut *tx, *id).await?,
            WriteOp::UpsertNote(note) => self.notes.upsert(&mut *tx, note).await?,
            WriteOp::DeleteNote(id) => self.notes.delete(&mut *tx, *id).await?,
            WriteOp::UpsertVisitLog(log) => self.visit_logs.upsert(&mut *tx, log).await?,
            WriteOp::DeleteVisitLog(id) => self.visit_logs.delete(&mut *tx, *id).await?,
            WriteOp::UpsertChecklist(checklist) => self.checklists.upsert(&mut *tx, checklist).await?,
            WriteOp::UpsertOtherPayment(payment) => self.other_payments.upsert(&mut *tx, payment).await?,
            WriteOp::DeleteOtherPayment(id) => self.other_payments.delete(&mut *tx, *id).await?,
            WriteOp::ResetAll => {
                sqlx::query(
                    "TRUNCATE other_payments, installments, checklists, visit_logs, notes, partners, contracts, clients",
                )
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
