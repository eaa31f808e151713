//! Pricing Resolver
//!
//! Suggested membership prices: the persisted configuration when
//! present, hardcoded defaults otherwise. A store failure during the
//! lookup is logged and treated as "use default" since the suggestion
//! only pre-fills a form.

use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::db::models::{MembershipPrices, MembershipType};
use crate::db::repository::PriceConfigRepository;

/// Fallback prices in cents when no configuration exists
pub fn default_price_cents(membership_type: MembershipType) -> i64 {
    match membership_type {
        MembershipType::Mensual => 500_000,
        MembershipType::Trimestral => 1_350_000,
        MembershipType::Semestral => 2_500_000,
        MembershipType::Anual => 4_500_000,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectivePrice {
    pub membership_type: MembershipType,
    pub price_cents: i64,
    pub price: Decimal,
    pub is_default: bool,
}

pub struct PricingService {
    repo: PriceConfigRepository,
}

impl PricingService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            repo: PriceConfigRepository::new(db),
        }
    }

    pub fn repo(&self) -> &PriceConfigRepository {
        &self.repo
    }

    /// Suggested price in cents for one type; never fails
    pub async fn suggested_price_cents(&self, membership_type: MembershipType) -> i64 {
        match self.repo.get().await {
            Ok(Some(prices)) => prices
                .price_for(membership_type)
                .unwrap_or_else(|| default_price_cents(membership_type)),
            Ok(None) => default_price_cents(membership_type),
            Err(err) => {
                tracing::warn!(error = %err, "price config lookup failed, using default");
                default_price_cents(membership_type)
            }
        }
    }

    /// Effective price for every type, flagging which came from defaults
    pub async fn effective_prices(&self) -> Vec<EffectivePrice> {
        let stored = match self.repo.get().await {
            Ok(prices) => prices,
            Err(err) => {
                tracing::warn!(error = %err, "price config lookup failed, using defaults");
                None
            }
        };
        effective_from(stored.as_ref())
    }
}

fn effective_from(stored: Option<&MembershipPrices>) -> Vec<EffectivePrice> {
    MembershipType::ALL
        .iter()
        .map(|&membership_type| {
            let configured = stored.and_then(|p| p.price_for(membership_type));
            let price_cents = configured.unwrap_or_else(|| default_price_cents(membership_type));
            EffectivePrice {
                membership_type,
                price_cents,
                price: Decimal::new(price_cents, 2),
                is_default: configured.is_none(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn absent_config_yields_monthly_default() {
        let prices = effective_from(None);
        let mensual = prices
            .iter()
            .find(|p| p.membership_type == MembershipType::Mensual)
            .unwrap();
        assert_eq!(mensual.price_cents, 500_000);
        assert_eq!(mensual.price, Decimal::from_str("5000.00").unwrap());
        assert!(mensual.is_default);
    }

    #[test]
    fn configured_price_overrides_default_per_type() {
        let stored = MembershipPrices {
            mensual: Some(600_000),
            trimestral: None,
            semestral: None,
            anual: None,
            updated_at: None,
        };

        let prices = effective_from(Some(&stored));
        let mensual = prices
            .iter()
            .find(|p| p.membership_type == MembershipType::Mensual)
            .unwrap();
        assert_eq!(mensual.price_cents, 600_000);
        assert!(!mensual.is_default);

        let anual = prices
            .iter()
            .find(|p| p.membership_type == MembershipType::Anual)
            .unwrap();
        assert_eq!(anual.price_cents, 4_500_000);
        assert!(anual.is_default);
    }
}
