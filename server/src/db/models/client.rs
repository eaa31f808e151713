//! Client Model
//!
//! Clients are keyed by their DNI (national ID): the record key is the
//! DNI itself, so `cliente:⟨dni⟩` is the natural key and duplicates are
//! detected by a plain existence check.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

pub type ClientId = RecordId;

/// Client record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ClientId>,

    /// Full name
    pub name: String,

    /// National ID, immutable once created
    pub dni: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default = "serde_helpers::default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub created_at: Option<i64>,

    #[serde(default)]
    pub updated_at: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClientCreate {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "dni is required"))]
    pub dni: String,

    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Partial update; `dni` is intentionally absent (immutable key)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
