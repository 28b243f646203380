// src/state.rs

//! O agregado em memória do painel.
//!
//! `AppData` é um snapshot imutável: cada mutação clona o snapshot atual,
//! aplica a alteração na cópia e troca o ponteiro de uma vez. Quem já leu um
//! snapshot continua vendo exatamente o que leu.

use std::{collections::BTreeMap, sync::Arc};

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{StoredData, WriteBehind, WriteOp},
    models::{
        checklist::ProjectChecklist,
        client::Client,
        contract::Contract,
        installment::PaymentInstallment,
        note::Note,
        other_payment::OtherPayment,
        partner::Partner,
        pricing::PricingTables,
        progress::ProjectProgress,
        schedule::{ProjectSchedule, ProjectStageTemplateItem},
        visit_log::VisitLog,
    },
    services::{progress::generate_project_progress, scheduling::default_stage_template},
};

#[derive(Debug, Clone)]
pub struct AppData {
    pub clients: BTreeMap<Uuid, Client>,
    pub contracts: BTreeMap<Uuid, Contract>,
    pub installments: BTreeMap<Uuid, PaymentInstallment>,
    // Cronogramas, consolidações e checklists são indexados pelo contrato
    pub schedules: BTreeMap<Uuid, ProjectSchedule>,
    pub project_progress: BTreeMap<Uuid, ProjectProgress>,
    pub checklists: BTreeMap<Uuid, ProjectChecklist>,
    pub partners: BTreeMap<Uuid, Partner>,
    pub notes: BTreeMap<Uuid, Note>,
    pub visit_logs: BTreeMap<Uuid, VisitLog>,
    pub other_payments: BTreeMap<Uuid, OtherPayment>,
    pub project_stages_template: Vec<ProjectStageTemplateItem>,
    pub pricing: PricingTables,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            clients: BTreeMap::new(),
            contracts: BTreeMap::new(),
            installments: BTreeMap::new(),
            schedules: BTreeMap::new(),
            project_progress: BTreeMap::new(),
            checklists: BTreeMap::new(),
            partners: BTreeMap::new(),
            notes: BTreeMap::new(),
            visit_logs: BTreeMap::new(),
            other_payments: BTreeMap::new(),
            project_stages_template: default_stage_template(),
            pricing: PricingTables::default(),
        }
    }
}

impl AppData {
    /// Monta o agregado a partir do que veio do banco. Os cronogramas vêm
    /// embutidos nos contratos e as consolidações são sempre regeneradas.
    pub fn from_stored(stored: StoredData, today: NaiveDate) -> Self {
        let mut data = AppData::default();

        for (contract, schedule) in stored.contracts {
            if let Some(schedule) = schedule {
                data.project_progress
                    .insert(contract.id, generate_project_progress(&schedule, today));
                data.schedules.insert(contract.id, schedule);
            }
            data.contracts.insert(contract.id, contract);
        }

        data.clients = stored.clients.into_iter().map(|c| (c.id, c)).collect();
        data.installments = stored.installments.into_iter().map(|i| (i.id, i)).collect();
        data.checklists = stored.checklists.into_iter().map(|c| (c.contract_id, c)).collect();
        data.partners = stored.partners.into_iter().map(|p| (p.id, p)).collect();
        data.notes = stored.notes.into_iter().map(|n| (n.id, n)).collect();
        data.visit_logs = stored.visit_logs.into_iter().map(|v| (v.id, v)).collect();
        data.other_payments = stored.other_payments.into_iter().map(|p| (p.id, p)).collect();
        data
    }

    pub fn client_by_name(&self, name: &str) -> Option<&Client> {
        self.clients.values().find(|c| c.name == name)
    }

    pub fn contract(&self, id: Uuid) -> Result<&Contract, AppError> {
        self.contracts.get(&id).ok_or(AppError::ContractNotFound(id))
    }

    /// Parcelas de um contrato, na ordem do plano (entrada primeiro).
    pub fn installments_of(&self, contract_id: Uuid) -> Vec<PaymentInstallment> {
        let mut rows: Vec<_> = self
            .installments
            .values()
            .filter(|i| i.contract_id == contract_id)
            .cloned()
            .collect();
        rows.sort_by_key(|i| i.slot);
        rows
    }

    pub fn visit_logs_of(&self, contract_id: Uuid) -> Vec<VisitLog> {
        let mut logs: Vec<_> = self
            .visit_logs
            .values()
            .filter(|v| v.contract_id == contract_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        logs
    }

    /// Remove o contrato e tudo que pendura nele.
    pub fn remove_contract_cascade(&mut self, contract_id: Uuid) {
        self.contracts.remove(&contract_id);
        self.installments.retain(|_, i| i.contract_id != contract_id);
        self.schedules.remove(&contract_id);
        self.project_progress.remove(&contract_id);
        self.checklists.remove(&contract_id);
        self.visit_logs.retain(|_, v| v.contract_id != contract_id);
        self.notes.retain(|_, n| n.contract_id != Some(contract_id));
        self.other_payments.retain(|_, p| p.contract_id != Some(contract_id));
    }

    pub fn export(&self) -> DatabaseSnapshot {
        DatabaseSnapshot {
            clients: self.clients.values().cloned().collect(),
            contracts: self.contracts.values().cloned().collect(),
            installments: self.installments.values().cloned().collect(),
            schedules: self.schedules.values().cloned().collect(),
            project_progress: self.project_progress.values().cloned().collect(),
            checklists: self.checklists.values().cloned().collect(),
            partners: self.partners.values().cloned().collect(),
            notes: self.notes.values().cloned().collect(),
            visit_logs: self.visit_logs.values().cloned().collect(),
            other_payments: self.other_payments.values().cloned().collect(),
            project_stages_template: self.project_stages_template.clone(),
            pricing: self.pricing.clone(),
        }
    }
}

/// Exportação completa do agregado (tela "Banco de Dados").
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSnapshot {
    pub clients: Vec<Client>,
    pub contracts: Vec<Contract>,
    pub installments: Vec<PaymentInstallment>,
    pub schedules: Vec<ProjectSchedule>,
    pub project_progress: Vec<ProjectProgress>,
    pub checklists: Vec<ProjectChecklist>,
    pub partners: Vec<Partner>,
    pub notes: Vec<Note>,
    pub visit_logs: Vec<VisitLog>,
    pub other_payments: Vec<OtherPayment>,
    pub project_stages_template: Vec<ProjectStageTemplateItem>,
    pub pricing: PricingTables,
}

/// Contexto que detém o estado. Compartilhado entre os serviços.
#[derive(Clone)]
pub struct DashboardState {
    current: Arc<RwLock<Arc<AppData>>>,
    writer: WriteBehind,
}

impl DashboardState {
    pub fn new(initial: AppData, writer: WriteBehind) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(initial))),
            writer,
        }
    }

    pub async fn snapshot(&self) -> Arc<AppData> {
        self.current.read().await.clone()
    }

    /// Aplica uma mutação sobre uma cópia do snapshot atual.
    ///
    /// Se a mutação falhar nada muda. Se der certo, o novo snapshot entra no
    /// lugar do antigo e as gravações devolvidas vão para a fila do banco
    /// sem esperar confirmação.
    pub async fn commit<T, F>(&self, mutation: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut AppData) -> Result<(T, Vec<WriteOp>), AppError>,
    {
        let mut guard = self.current.write().await;
        let mut next = AppData::clone(&guard);
        let (output, ops) = mutation(&mut next)?;
        *guard = Arc::new(next);

        // Ainda sob o lock, para a fila seguir a ordem das trocas de snapshot
        for op in ops {
            self.writer.submit(op);
        }
        Ok(output)
    }

    /// Espera o banco aplicar tudo que já foi enfileirado.
    pub async fn flush(&self) -> Result<(), AppError> {
        self.writer.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use chrono::Utc;

    fn note(contract_id: Option<Uuid>) -> Note {
        Note {
            id: Uuid::new_v4(),
            contract_id,
            title: "Ligar".into(),
            content: String::new(),
            alert_date: None,
            completed: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn commit_swaps_snapshot_without_touching_readers() {
        let state = DashboardState::new(AppData::default(), WriteBehind::spawn(Arc::new(MemoryStore::new())));
        let before = state.snapshot().await;

        let n = note(None);
        let id = n.id;
        state
            .commit(|data| {
                data.notes.insert(n.id, n.clone());
                Ok(((), vec![WriteOp::UpsertNote(n)]))
            })
            .await
            .unwrap();

        assert!(before.notes.is_empty());
        assert!(state.snapshot().await.notes.contains_key(&id));
    }

    #[tokio::test]
    async fn failed_mutation_keeps_previous_snapshot() {
        let state = DashboardState::new(AppData::default(), WriteBehind::spawn(Arc::new(MemoryStore::new())));
        let missing = Uuid::new_v4();

        let result: Result<(), AppError> = state
            .commit(|data| {
                data.notes.insert(Uuid::new_v4(), note(None));
                data.contract(missing)?;
                Ok(((), vec![]))
            })
            .await;

        assert!(matches!(result, Err(AppError::ContractNotFound(id)) if id == missing));
        assert!(state.snapshot().await.notes.is_empty());
    }

    #[test]
    fn cascade_removes_everything_tied_to_the_contract() {
        let mut data = AppData::default();
        let contract_id = Uuid::new_v4();
        let kept = note(None);
        let dropped = note(Some(contract_id));
        data.notes.insert(kept.id, kept.clone());
        data.notes.insert(dropped.id, dropped);
        data.checklists.insert(
            contract_id,
            ProjectChecklist { contract_id, completed_item_ids: vec!["eletrica".into()] },
        );
        data.visit_logs.insert(
            Uuid::new_v4(),
            VisitLog {
                id: Uuid::new_v4(),
                contract_id,
                date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                notes: "gesso".into(),
                created_at: Utc::now(),
            },
        );

        let payment = OtherPayment {
            id: Uuid::new_v4(),
            contract_id: Some(contract_id),
            description: "Visita extra".into(),
            value: rust_decimal::Decimal::from(300),
            date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            created_at: Utc::now(),
        };
        data.other_payments.insert(payment.id, payment);

        data.remove_contract_cascade(contract_id);

        assert!(data.checklists.is_empty());
        assert!(data.other_payments.is_empty());
        assert!(data.visit_logs.is_empty());
        assert_eq!(data.notes.len(), 1);
        assert!(data.notes.contains_key(&kept.id));
    }
}
