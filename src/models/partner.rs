// src/models/partner.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::validation::not_blank;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: Uuid,

    #[schema(example = "Marcenaria Silva")]
    pub name: String,

    // Categoria livre: marcenaria, iluminação, vidraçaria...
    #[serde(rename = "type")]
    #[schema(example = "Marcenaria")]
    pub partner_type: String,

    #[serde(flatten)]
    pub details: PartnerDetails,
}

/// Dados de contato, gravados na coluna JSONB `partners.data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerDetails {
    #[schema(example = "João Silva")]
    pub contact_person: Option<String>,

    #[schema(example = "(11) 99999-8888")]
    pub phone: Option<String>,

    #[schema(example = "contato@marcenariasilva.com")]
    pub email: Option<String>,

    pub address: Option<String>,

    // Clientes atendidos por este parceiro
    #[serde(default)]
    pub client_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerPayload {
    #[validate(custom(function = "not_blank"))]
    pub name: String,

    #[serde(rename = "type")]
    #[validate(custom(function = "not_blank"))]
    pub partner_type: String,

    pub contact_person: Option<String>,
    pub phone: Option<String>,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,

    pub address: Option<String>,

    #[serde(default)]
    pub client_ids: Vec<Uuid>,
}

impl PartnerPayload {
    pub fn into_partner(self, id: Uuid) -> Partner {
        Partner {
            id,
            name: self.name,
            partner_type: self.partner_type,
            details: PartnerDetails {
                contact_person: self.contact_person,
                phone: self.phone,
                email: self.email,
                address: self.address,
                client_ids: self.client_ids,
            },
        }
    }
}
