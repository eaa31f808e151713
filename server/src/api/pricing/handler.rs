//! Pricing API Handlers

use std::str::FromStr;

use axum::{
    extract::{Path, State},
    Json,
};
use rust_decimal::Decimal;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{MembershipPrices, MembershipPricesUpdate, MembershipType};
use crate::services::pricing::EffectivePrice;
use crate::utils::{AppError, AppResult};

/// GET /api/pricing - effective price per type
pub async fn get_config(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<EffectivePrice>>> {
    Ok(Json(state.pricing.effective_prices().await))
}

/// PUT /api/pricing - replace configured prices
pub async fn update_config(
    State(state): State<ServerState>,
    Json(payload): Json<MembershipPricesUpdate>,
) -> AppResult<Json<MembershipPrices>> {
    payload.validate()?;

    let prices = MembershipPrices {
        mensual: Some(payload.mensual),
        trimestral: Some(payload.trimestral),
        semestral: Some(payload.semestral),
        anual: Some(payload.anual),
        updated_at: None,
    };

    let stored = state.pricing.repo().upsert(prices).await?;
    tracing::info!("membership prices updated");
    Ok(Json(stored))
}

#[derive(serde::Serialize)]
pub struct SuggestedPrice {
    pub membership_type: MembershipType,
    pub price_cents: i64,
    pub price: Decimal,
}

/// GET /api/pricing/suggested/:membership_type - form pre-fill value
pub async fn suggested(
    State(state): State<ServerState>,
    Path(membership_type): Path<String>,
) -> AppResult<Json<SuggestedPrice>> {
    let membership_type = MembershipType::from_str(&membership_type)
        .map_err(AppError::Invalid)?;

    let price_cents = state.pricing.suggested_price_cents(membership_type).await;
    Ok(Json(SuggestedPrice {
        membership_type,
        price_cents,
        price: Decimal::new(price_cents, 2),
    }))
}
