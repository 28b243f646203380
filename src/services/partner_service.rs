// src/services/partner_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::WriteOp,
    models::partner::{Partner, PartnerPayload},
    state::DashboardState,
};

#[derive(Clone)]
pub struct PartnerService {
    state: DashboardState,
}

impl PartnerService {
    pub fn new(state: DashboardState) -> Self {
        Self { state }
    }

    pub async fn list_partners(&self) -> Vec<Partner> {
        let data = self.state.snapshot().await;
        let mut partners: Vec<_> = data.partners.values().cloned().collect();
        partners.sort_by(|a, b| a.name.cmp(&b.name));
        partners
    }

    pub async fn create_partner(&self, payload: PartnerPayload) -> Result<Partner, AppError> {
        self.state
            .commit(|data| {
                let partner = payload.into_partner(Uuid::new_v4());
                data.partners.insert(partner.id, partner.clone());
                Ok((partner.clone(), vec![WriteOp::UpsertPartner(partner)]))
            })
            .await
    }

    pub async fn update_partner(&self, id: Uuid, payload: PartnerPayload) -> Result<Partner, AppError> {
        self.state
            .commit(|data| {
                if !data.partners.contains_key(&id) {
                    return Err(not_found(id));
                }
                let partner = payload.into_partner(id);
                data.partners.insert(id, partner.clone());
                Ok((partner.clone(), vec![WriteOp::UpsertPartner(partner)]))
            })
            .await
    }

    pub async fn delete_partner(&self, id: Uuid) -> Result<(), AppError> {
        self.state
            .commit(|data| {
                data.partners.remove(&id).ok_or_else(|| not_found(id))?;
                Ok(((), vec![WriteOp::DeletePartner(id)]))
            })
            .await
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::ResourceNotFound(format!("parceiro {}", id))
}
