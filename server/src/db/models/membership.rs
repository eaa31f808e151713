//! Membership Model

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

pub type MembershipId = RecordId;

/// Membership type; the wire value is the Spanish label, which is also
/// the key used in the persisted price configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipType {
    Mensual,
    Trimestral,
    Semestral,
    Anual,
}

impl MembershipType {
    pub const ALL: [MembershipType; 4] = [
        MembershipType::Mensual,
        MembershipType::Trimestral,
        MembershipType::Semestral,
        MembershipType::Anual,
    ];

    /// Fixed duration in days
    pub fn duration_days(&self) -> i64 {
        match self {
            MembershipType::Mensual => 30,
            MembershipType::Trimestral => 90,
            MembershipType::Semestral => 180,
            MembershipType::Anual => 365,
        }
    }

    /// Expiration date for a membership starting on `start`
    pub fn expiry_from(&self, start: NaiveDate) -> NaiveDate {
        start + Duration::days(self.duration_days())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipType::Mensual => "Mensual",
            MembershipType::Trimestral => "Trimestral",
            MembershipType::Semestral => "Semestral",
            MembershipType::Anual => "Anual",
        }
    }
}

impl fmt::Display for MembershipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mensual" => Ok(MembershipType::Mensual),
            "Trimestral" => Ok(MembershipType::Trimestral),
            "Semestral" => Ok(MembershipType::Semestral),
            "Anual" => Ok(MembershipType::Anual),
            other => Err(format!("unknown membership type: {}", other)),
        }
    }
}

/// Payment method accepted for memberships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipPayment {
    Efectivo,
    Transferencia,
    DebitoAutomatico,
}

impl MembershipPayment {
    /// Human-readable label for exports and summaries
    pub fn display(&self) -> &'static str {
        match self {
            MembershipPayment::Efectivo => "Efectivo",
            MembershipPayment::Transferencia => "Transferencia",
            MembershipPayment::DebitoAutomatico => "Débito Automático",
        }
    }
}

/// Membership record
///
/// `created_at` is optional to accommodate legacy records imported
/// without a server timestamp; the recency ordering falls back to
/// `start_date` for those.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<MembershipId>,

    /// DNI of the owning client
    pub client_dni: String,

    pub membership_type: MembershipType,

    /// Start date at 00:00 business time, Unix millis
    pub start_date: i64,

    /// start_date + duration, Unix millis; always recomputed server-side
    pub expires_at: i64,

    pub price_cents: i64,

    pub payment_method: MembershipPayment,

    #[serde(default)]
    pub notes: String,

    #[serde(default = "serde_helpers::default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,

    #[serde(default)]
    pub created_at: Option<i64>,

    #[serde(default)]
    pub updated_at: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MembershipCreate {
    #[validate(length(min = 1, message = "client_dni is required"))]
    pub client_dni: String,

    pub membership_type: MembershipType,

    /// YYYY-MM-DD
    pub start_date: String,

    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price_cents: i64,

    pub payment_method: MembershipPayment,

    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Membership enriched with the owning client's display name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipWithClient {
    #[serde(flatten)]
    pub membership: Membership,
    pub client_name: String,
}

/// Placeholder used when the referenced client no longer exists
pub const MISSING_CLIENT_NAME: &str = "Cliente no encontrado";
