// src/db/persistence.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        checklist::ProjectChecklist,
        client::Client,
        contract::Contract,
        installment::{InstallmentSlot, PaymentInstallment},
        note::Note,
        other_payment::OtherPayment,
        partner::Partner,
        schedule::ProjectSchedule,
        visit_log::VisitLog,
    },
};

/// Tudo que o banco guarda, como foi lido na carga inicial.
#[derive(Debug, Clone, Default)]
pub struct StoredData {
    pub clients: Vec<Client>,
    // O cronograma mora dentro do payload do contrato
    pub contracts: Vec<(Contract, Option<ProjectSchedule>)>,
    pub installments: Vec<PaymentInstallment>,
    pub checklists: Vec<ProjectChecklist>,
    pub partners: Vec<Partner>,
    pub notes: Vec<Note>,
    pub visit_logs: Vec<VisitLog>,
    pub other_payments: Vec<OtherPayment>,
}

/// Uma gravação no banco. Cada variante é aplicada de forma atômica.
#[derive(Debug, Clone)]
pub enum WriteOp {
    SaveContract {
        // Presente quando o contrato trouxe um cliente novo
        new_client: Option<Client>,
        contract: Contract,
        schedule: ProjectSchedule,
        installments: Vec<PaymentInstallment>,
        obsolete_slots: Vec<InstallmentSlot>,
    },
    DeleteContract {
        contract_id: Uuid,
    },
    SaveSchedule {
        contract_id: Uuid,
        schedule: ProjectSchedule,
    },
    SaveInstallmentPayment(PaymentInstallment),
    UpsertPartner(Partner),
    DeletePartner(Uuid),
    UpsertNote(Note),
    DeleteNote(Uuid),
    UpsertVisitLog(VisitLog),
    DeleteVisitLog(Uuid),
    UpsertChecklist(ProjectChecklist),
    UpsertOtherPayment(OtherPayment),
    DeleteOtherPayment(Uuid),
    ResetAll,
}

impl WriteOp {
    pub fn name(&self) -> &'static str {
        match self {
            WriteOp::SaveContract { .. } => "save_contract",
            WriteOp::DeleteContract { .. } => "delete_contract",
            WriteOp::SaveSchedule { .. } => "save_schedule",
            WriteOp::SaveInstallmentPayment(_) => "save_installment_payment",
            WriteOp::UpsertPartner(_) => "upsert_partner",
            WriteOp::DeletePartner(_) => "delete_partner",
            WriteOp::UpsertNote(_) => "upsert_note",
            WriteOp::DeleteNote(_) => "delete_note",
            WriteOp::UpsertVisitLog(_) => "upsert_visit_log",
            WriteOp::DeleteVisitLog(_) => "delete_visit_log",
            WriteOp::UpsertChecklist(_) => "upsert_checklist",
            WriteOp::UpsertOtherPayment(_) => "upsert_other_payment",
            WriteOp::DeleteOtherPayment(_) => "delete_other_payment",
            WriteOp::ResetAll => "reset_all",
        }
    }
}

/// O armazenamento remoto (cópia durável do agregado).
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Lê todas as coleções.
    async fn load_all(&self) -> Result<StoredData, AppError>;

    /// Aplica uma gravação; ou tudo entra, ou nada entra.
    async fn apply(&self, op: &WriteOp) -> Result<(), AppError>;
}
