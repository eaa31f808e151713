//! Expense Model

use serde::{Deserialize, Serialize};
use std::fmt;
use surrealdb::RecordId;
use validator::Validate;

use super::income::PaymentMethod;
use super::serde_helpers;

pub type ExpenseId = RecordId;

/// Expense concept categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseConcept {
    Insumos,
    Alquiler,
    Servicios,
    Mantenimiento,
    Marketing,
    Otros,
}

impl ExpenseConcept {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseConcept::Insumos => "insumos",
            ExpenseConcept::Alquiler => "alquiler",
            ExpenseConcept::Servicios => "servicios",
            ExpenseConcept::Mantenimiento => "mantenimiento",
            ExpenseConcept::Marketing => "marketing",
            ExpenseConcept::Otros => "otros",
        }
    }
}

impl fmt::Display for ExpenseConcept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expense record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ExpenseId>,

    /// Occurrence date, Unix millis
    pub date: i64,

    pub concept: ExpenseConcept,

    #[serde(default)]
    pub supplier: String,

    #[serde(default)]
    pub description: String,

    pub payment_method: PaymentMethod,

    pub amount_cents: i64,

    #[serde(default)]
    pub created_at: Option<i64>,

    #[serde(default)]
    pub updated_at: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExpenseCreate {
    /// YYYY-MM-DD
    pub date: String,

    pub concept: ExpenseConcept,

    #[serde(default)]
    pub supplier: String,

    #[serde(default)]
    pub description: String,

    pub payment_method: PaymentMethod,

    #[validate(range(min = 1, message = "amount must be positive"))]
    pub amount_cents: i64,
}
