// src/db/memory_store.rs

//! Armazenamento em memória, para desenvolvimento e testes.

use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::persistence::{RemoteStore, StoredData, WriteOp},
    models::{
        checklist::ProjectChecklist,
        client::Client,
        contract::Contract,
        installment::PaymentInstallment,
        note::Note,
        other_payment::OtherPayment,
        partner::Partner,
        schedule::ProjectSchedule,
        visit_log::VisitLog,
    },
};

#[derive(Debug, Default)]
struct Tables {
    clients: BTreeMap<Uuid, Client>,
    contracts: BTreeMap<Uuid, (Contract, Option<ProjectSchedule>)>,
    installments: BTreeMap<Uuid, PaymentInstallment>,
    checklists: BTreeMap<Uuid, ProjectChecklist>,
    partners: BTreeMap<Uuid, Partner>,
    notes: BTreeMap<Uuid, Note>,
    visit_logs: BTreeMap<Uuid, VisitLog>,
    other_payments: BTreeMap<Uuid, OtherPayment>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Já começa com os dados informados (como se tivessem vindo do banco).
    pub fn with_data(data: StoredData) -> Self {
        let tables = Tables {
            clients: data.clients.into_iter().map(|c| (c.id, c)).collect(),
            contracts: data.contracts.into_iter().map(|(c, s)| (c.id, (c, s))).collect(),
            installments: data.installments.into_iter().map(|i| (i.id, i)).collect(),
            checklists: data.checklists.into_iter().map(|c| (c.contract_id, c)).collect(),
            partners: data.partners.into_iter().map(|p| (p.id, p)).collect(),
            notes: data.notes.into_iter().map(|n| (n.id, n)).collect(),
            visit_logs: data.visit_logs.into_iter().map(|v| (v.id, v)).collect(),
            other_payments: data.other_payments.into_iter().map(|p| (p.id, p)).collect(),
        };
        Self {
            tables: RwLock::new(tables),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Faz toda gravação seguinte falhar (simula banco fora do ar).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn load_all(&self) -> Result<StoredData, AppError> {
        let t = self.tables.read().await;
        Ok(StoredData {
            clients: t.clients.values().cloned().collect(),
            contracts: t.contracts.values().cloned().collect(),
            installments: t.installments.values().cloned().collect(),
            checklists: t.checklists.values().cloned().collect(),
            partners: t.partners.values().cloned().collect(),
            notes: t.notes.values().cloned().collect(),
            visit_logs: t.visit_logs.values().cloned().collect(),
            other_payments: t.other_payments.values().cloned().collect(),
        })
    }

    async fn apply(&self, op: &WriteOp) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::InternalServerError(anyhow::anyhow!(
                "armazenamento em memória configurado para falhar ({})",
                op.name()
            )));
        }

        let mut t = self.tables.write().await;
        match op {
            WriteOp::SaveContract {
                new_client,
                contract,
                schedule,
                installments,
                obsolete_slots,
            } => {
                if let Some(client) = new_client {
                    t.clients.insert(client.id, client.clone());
                }
                t.contracts
                    .insert(contract.id, (contract.clone(), Some(schedule.clone())));
                t.installments.retain(|_, i| {
                    i.contract_id != contract.id || !obsolete_slots.contains(&i.slot)
                });
                for installment in installments {
                    // A linha é identificada por (contrato, posição)
                    t.installments
                        .retain(|_, i| !(i.contract_id == contract.id && i.slot == installment.slot));
                    t.installments.insert(installment.id, installment.clone());
                }
            }
            WriteOp::DeleteContract { contract_id } => {
                t.contracts.remove(contract_id);
                t.installments.retain(|_, i| i.contract_id != *contract_id);
                t.checklists.remove(contract_id);
                t.visit_logs.retain(|_, v| v.contract_id != *contract_id);
                t.notes.retain(|_, n| n.contract_id != Some(*contract_id));
                t.other_payments.retain(|_, p| p.contract_id != Some(*contract_id));
            }
            WriteOp::SaveSchedule { contract_id, schedule } => {
                if let Some((_, stored)) = t.contracts.get_mut(contract_id) {
                    *stored = Some(schedule.clone());
                }
            }
            WriteOp::SaveInstallmentPayment(installment) => {
                if let Some(row) = t.installments.get_mut(&installment.id) {
                    row.status = installment.status;
                    row.payment_date = installment.payment_date;
                }
            }
            WriteOp::UpsertPartner(partner) => {
                t.partners.insert(partner.id, partner.clone());
            }
            WriteOp::DeletePartner(id) => {
                t.partners.remove(id);
            }
            WriteOp::UpsertNote(note) => {
                t.notes.insert(note.id, note.clone());
            }
            WriteOp::DeleteNote(id) => {
                t.notes.remove(id);
            }
            WriteOp::UpsertVisitLog(log) => {
                t.visit_logs.insert(log.id, log.clone());
            }
            WriteOp::DeleteVisitLog(id) => {
                t.visit_logs.remove(id);
            }
            WriteOp::UpsertChecklist(checklist) => {
                t.checklists.insert(checklist.contract_id, checklist.clone());
            }
            WriteOp::UpsertOtherPayment(payment) => {
                t.other_payments.insert(payment.id, payment.clone());
            }
            WriteOp::DeleteOtherPayment(id) => {
                t.other_payments.remove(id);
            }
            WriteOp::ResetAll => {
                *t = Tables::default();
            }
        }
        Ok(())
    }
}
