//! Income Model

use serde::{Deserialize, Serialize};
use std::fmt;
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

pub type IncomeId = RecordId;

/// Payment method for over-the-counter income and expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "efectivo")]
    Efectivo,
    #[serde(rename = "débito")]
    Debito,
    #[serde(rename = "crédito")]
    Credito,
    #[serde(rename = "transferencia")]
    Transferencia,
    #[serde(rename = "qr")]
    Qr,
    #[serde(rename = "mp")]
    Mp,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Efectivo => "efectivo",
            PaymentMethod::Debito => "débito",
            PaymentMethod::Credito => "crédito",
            PaymentMethod::Transferencia => "transferencia",
            PaymentMethod::Qr => "qr",
            PaymentMethod::Mp => "mp",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog snapshot embedded in an income record
///
/// The price is captured at sale time; later catalog changes do not
/// affect recorded incomes. `product_id` is a plain string for the same
/// reason: it is a snapshot, not a live record link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeItem {
    #[serde(default)]
    pub product_id: Option<String>,
    pub name: String,
    pub price_cents: i64,
}

/// Income record (sale or service rendered)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<IncomeId>,

    /// Occurrence date, Unix millis
    pub date: i64,

    /// Free text, not a client reference
    #[serde(default)]
    pub client_name: String,

    /// Staff member who performed the sale/service
    #[serde(default)]
    pub operator: String,

    pub payment_method: PaymentMethod,

    /// Free-text consumption note
    #[serde(default)]
    pub note: String,

    /// Zero or one embedded catalog snapshot
    #[serde(default)]
    pub items: Vec<IncomeItem>,

    pub total_cents: i64,

    #[serde(default)]
    pub created_at: Option<i64>,

    #[serde(default)]
    pub updated_at: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IncomeCreate {
    /// YYYY-MM-DD
    pub date: String,

    #[serde(default)]
    pub client_name: String,

    #[serde(default)]
    pub operator: String,

    pub payment_method: PaymentMethod,

    #[serde(default)]
    pub note: String,

    /// Optional catalog item sold with this income
    #[serde(default)]
    pub item: Option<IncomeItem>,

    #[validate(range(min = 1, message = "amount must be positive"))]
    pub total_cents: i64,
}
