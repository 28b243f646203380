// src/services/pricing_service.rs

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::pricing::{tier_price, PricingQuote, PricingTables},
    state::DashboardState,
};

/// Tabelas de preço. Ficam só em memória, como o modelo de etapas.
#[derive(Clone)]
pub struct PricingService {
    state: DashboardState,
}

impl PricingService {
    pub fn new(state: DashboardState) -> Self {
        Self { state }
    }

    pub async fn pricing(&self) -> PricingTables {
        self.state.snapshot().await.pricing.clone()
    }

    pub async fn update_pricing(&self, tables: PricingTables) -> Result<PricingTables, AppError> {
        unique_ids("serviço", tables.service_prices.iter().map(|s| s.id))?;
        unique_ids("valor-hora", tables.hourly_rates.iter().map(|r| r.id))?;
        unique_ids("faixa de medição", tables.measurement_tiers.iter().map(|t| t.id))?;
        unique_ids("faixa de deslocamento", tables.extra_tiers.iter().map(|t| t.id))?;

        let tables = self
            .state
            .commit(|data| {
                data.pricing = tables.clone();
                Ok((tables, vec![]))
            })
            .await?;

        tracing::info!("Tabelas de preço atualizadas");
        Ok(tables)
    }

    /// Preço de medição pela área e adicional de deslocamento pela distância.
    pub async fn quote(&self, area: Option<Decimal>, distance: Option<Decimal>) -> PricingQuote {
        let data = self.state.snapshot().await;
        PricingQuote {
            measurement: area.and_then(|a| tier_price(&data.pricing.measurement_tiers, a)),
            travel: distance.and_then(|d| tier_price(&data.pricing.extra_tiers, d)),
        }
    }
}

fn unique_ids(table: &str, ids: impl IntoIterator<Item = i32>) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(AppError::InvalidState(format!("Id {} repetido na tabela de {}", id, table)));
        }
    }
    Ok(())
}
