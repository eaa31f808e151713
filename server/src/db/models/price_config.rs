//! Membership Price Configuration
//!
//! A single record (`configuracion:precios_membresias`) mapping each
//! membership type to a suggested price in cents. Only a suggestion for
//! pre-filling the creation form, never enforced.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::membership::MembershipType;

/// Persisted price suggestions, keyed by the Spanish type label
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MembershipPrices {
    #[serde(rename = "Mensual", skip_serializing_if = "Option::is_none")]
    pub mensual: Option<i64>,

    #[serde(rename = "Trimestral", skip_serializing_if = "Option::is_none")]
    pub trimestral: Option<i64>,

    #[serde(rename = "Semestral", skip_serializing_if = "Option::is_none")]
    pub semestral: Option<i64>,

    #[serde(rename = "Anual", skip_serializing_if = "Option::is_none")]
    pub anual: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl MembershipPrices {
    /// Configured price for a type, if present
    pub fn price_for(&self, membership_type: MembershipType) -> Option<i64> {
        match membership_type {
            MembershipType::Mensual => self.mensual,
            MembershipType::Trimestral => self.trimestral,
            MembershipType::Semestral => self.semestral,
            MembershipType::Anual => self.anual,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MembershipPricesUpdate {
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub mensual: i64,

    #[validate(range(min = 0, message = "price must not be negative"))]
    pub trimestral: i64,

    #[validate(range(min = 0, message = "price must not be negative"))]
    pub semestral: i64,

    #[validate(range(min = 0, message = "price must not be negative"))]
    pub anual: i64,
}
