// src/models/pricing.rs

//! Tabelas de preço do estúdio (tela de configurações).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::models::validation::{non_negative, not_blank};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServicePrice {
    pub id: i32,

    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Projeto de Interiores")]
    pub name: String,

    // m², ambiente, projeto...
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "m²")]
    pub unit: String,

    #[validate(custom(function = "non_negative"))]
    #[schema(example = "120.00")]
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HourlyRate {
    pub id: i32,

    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Arquiteta sênior")]
    pub professional: String,

    #[validate(custom(function = "non_negative"))]
    #[schema(example = "180.00")]
    pub rate: Decimal,
}

/// Faixa de preço: vale até `up_to` (inclusive). Sem `up_to`, cobre tudo
/// acima da faixa anterior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceTier {
    pub id: i32,

    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Até 80 m²")]
    pub label: String,

    #[schema(example = "80")]
    pub up_to: Option<Decimal>,

    #[validate(custom(function = "non_negative"))]
    #[schema(example = "350.00")]
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_tiers"))]
pub struct PricingTables {
    #[validate(nested)]
    pub service_prices: Vec<ServicePrice>,

    #[validate(nested)]
    pub hourly_rates: Vec<HourlyRate>,

    // Medição, por área do imóvel (m²)
    #[validate(nested)]
    pub measurement_tiers: Vec<PriceTier>,

    // Adicional de deslocamento, por distância até a obra (km)
    #[validate(nested)]
    pub extra_tiers: Vec<PriceTier>,
}

// Limites crescentes; só a última faixa pode ficar em aberto
fn tiers_are_ordered(tiers: &[PriceTier]) -> bool {
    let mut previous: Option<Decimal> = None;
    for (i, tier) in tiers.iter().enumerate() {
        match tier.up_to {
            None if i + 1 < tiers.len() => return false,
            None => {}
            Some(limit) => {
                if previous.is_some_and(|p| limit <= p) {
                    return false;
                }
                previous = Some(limit);
            }
        }
    }
    true
}

fn validate_tiers(tables: &PricingTables) -> Result<(), ValidationError> {
    if !tiers_are_ordered(&tables.measurement_tiers) || !tiers_are_ordered(&tables.extra_tiers) {
        return Err(ValidationError::new("tiers_out_of_order"));
    }
    Ok(())
}

/// Preço da primeira faixa que cobre `amount`.
pub fn tier_price(tiers: &[PriceTier], amount: Decimal) -> Option<Decimal> {
    tiers
        .iter()
        .find(|t| t.up_to.is_none_or(|limit| amount <= limit))
        .map(|t| t.price)
}

impl Default for PricingTables {
    fn default() -> Self {
        let tier = |id, label: &str, up_to: Option<i64>, price: i64| PriceTier {
            id,
            label: label.to_string(),
            up_to: up_to.map(Decimal::from),
            price: Decimal::from(price),
        };

        Self {
            service_prices: vec![
                ServicePrice { id: 1, name: "Projeto de Interiores".into(), unit: "m²".into(), price: Decimal::from(120) },
                ServicePrice { id: 2, name: "Consultoria".into(), unit: "visita".into(), price: Decimal::from(450) },
                ServicePrice { id: 3, name: "Projeto Luminotécnico".into(), unit: "ambiente".into(), price: Decimal::from(600) },
            ],
            hourly_rates: vec![
                HourlyRate { id: 1, professional: "Arquiteta responsável".into(), rate: Decimal::from(180) },
                HourlyRate { id: 2, professional: "Projetista".into(), rate: Decimal::from(90) },
            ],
            measurement_tiers: vec![
                tier(1, "Até 80 m²", Some(80), 350),
                tier(2, "Até 150 m²", Some(150), 550),
                tier(3, "Acima de 150 m²", None, 800),
            ],
            extra_tiers: vec![
                tier(1, "Até 20 km", Some(20), 0),
                tier(2, "Até 50 km", Some(50), 120),
                tier(3, "Acima de 50 km", None, 250),
            ],
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuoteQuery {
    /// Área do imóvel em m²
    pub area: Option<Decimal>,
    /// Distância até a obra em km
    pub distance: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingQuote {
    pub measurement: Option<Decimal>,
    pub travel: Option<Decimal>,
}
