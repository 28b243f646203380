// src/services/contract_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::WriteOp,
    models::{
        client::Client,
        contract::{Contract, ContractFormPayload},
    },
    services::{
        billing::{generate_dependent_data, generate_installments, obsolete_slots, DependentData},
        calendar::today,
        progress::generate_project_progress,
        scheduling::rebase_schedule,
    },
    state::{AppData, DashboardState},
};

#[derive(Clone)]
pub struct ContractService {
    state: DashboardState,
}

// Cliente novo só quando ainda não existe ninguém com o mesmo nome
fn register_client(data: &mut AppData, name: &str) -> Option<Client> {
    if data.client_by_name(name).is_some() {
        return None;
    }
    let client = Client::named(name);
    data.clients.insert(client.id, client.clone());
    Some(client)
}

impl ContractService {
    pub fn new(state: DashboardState) -> Self {
        Self { state }
    }

    /// Contratos do mais recente para o mais antigo.
    pub async fn list_contracts(&self) -> Vec<Contract> {
        let data = self.state.snapshot().await;
        let mut contracts: Vec<_> = data.contracts.values().cloned().collect();
        contracts.sort_by(|a, b| b.terms.date.cmp(&a.terms.date));
        contracts
    }

    pub async fn get_contract(&self, id: Uuid) -> Result<Contract, AppError> {
        let data = self.state.snapshot().await;
        data.contract(id).cloned()
    }

    pub async fn list_clients(&self) -> Vec<Client> {
        let data = self.state.snapshot().await;
        let mut clients: Vec<_> = data.clients.values().cloned().collect();
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        clients
    }

    /// Cria o contrato e tudo que depende dele (parcelas, cronograma e
    /// consolidação). Vai para o banco numa única gravação.
    pub async fn create_contract(&self, payload: ContractFormPayload) -> Result<Contract, AppError> {
        let today = today();

        let contract = self
            .state
            .commit(|data| {
                let contract = payload.into_contract(Uuid::new_v4());
                let new_client = register_client(data, &contract.client_name);

                let DependentData { installments, schedule, progress } =
                    generate_dependent_data(&contract, &data.project_stages_template, today);

                for installment in &installments {
                    data.installments.insert(installment.id, installment.clone());
                }
                data.schedules.insert(contract.id, schedule.clone());
                data.project_progress.insert(contract.id, progress);
                data.contracts.insert(contract.id, contract.clone());

                let op = WriteOp::SaveContract {
                    new_client,
                    contract: contract.clone(),
                    schedule,
                    installments,
                    obsolete_slots: vec![],
                };
                Ok((contract, vec![op]))
            })
            .await?;

        tracing::info!(contract_id = %contract.id, client = %contract.client_name, "Contrato criado");
        Ok(contract)
    }

    /// Edita o contrato. As parcelas são regeneradas (as pagas continuam
    /// pagas) e o cronograma é reancorado na nova data do contrato.
    pub async fn update_contract(
        &self,
        id: Uuid,
        payload: ContractFormPayload,
    ) -> Result<Contract, AppError> {
        let today = today();

        self.state
            .commit(|data| {
                data.contract(id)?;
                let contract = payload.into_contract(id);
                let new_client = register_client(data, &contract.client_name);

                let previous = data.installments_of(id);
                let installments = generate_installments(&contract, &previous);
                let obsolete = obsolete_slots(&previous, &installments);

                data.installments.retain(|_, i| i.contract_id != id);
                for installment in &installments {
                    data.installments.insert(installment.id, installment.clone());
                }

                let schedule = rebase_schedule(
                    data.schedules.get(&id),
                    &contract,
                    &data.project_stages_template,
                );
                data.project_progress
                    .insert(id, generate_project_progress(&schedule, today));
                data.schedules.insert(id, schedule.clone());
                data.contracts.insert(id, contract.clone());

                if !obsolete.is_empty() {
                    tracing::debug!(contract_id = %id, slots = ?obsolete, "Parcelas removidas do plano");
                }

                let op = WriteOp::SaveContract {
                    new_client,
                    contract: contract.clone(),
                    schedule,
                    installments,
                    obsolete_slots: obsolete,
                };
                Ok((contract, vec![op]))
            })
            .await
    }

    /// Remove o contrato com parcelas, cronograma, checklist, visitas e notas.
    pub async fn delete_contract(&self, id: Uuid) -> Result<(), AppError> {
        self.state
            .commit(|data| {
                data.contract(id)?;
                data.remove_contract_cascade(id);
                Ok(((), vec![WriteOp::DeleteContract { contract_id: id }]))
            })
            .await?;

        tracing::info!(contract_id = %id, "Contrato removido");
        Ok(())
    }
}
