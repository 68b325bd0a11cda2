use core::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockledger_core::{DomainError, Entity, MovementId, StockItemId};

/// Direction of a recorded movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementType {
    /// Stock returned to the warehouse (quantity increased).
    Income,
    /// Stock sent out (quantity decreased).
    Expenses,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Income => "Income",
            MovementType::Expenses => "Expenses",
        }
    }

    /// Human label used on the history views.
    pub fn label(&self) -> &'static str {
        match self {
            MovementType::Income => "return",
            MovementType::Expenses => "send",
        }
    }
}

impl core::fmt::Display for MovementType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(MovementType::Income),
            "expenses" => Ok(MovementType::Expenses),
            other => Err(DomainError::validation(format!(
                "type must be one of: Income, Expenses (got {other:?})"
            ))),
        }
    }
}

/// Movement (order / log entry) as listed by `GET /logs`.
///
/// Decoding is lenient: older records may lack a description, classification
/// or value, and those read as empty / zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    #[serde(rename = "_id")]
    pub id: MovementId,
    #[serde(rename = "Classification", default)]
    pub classification: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "productId")]
    pub product_id: StockItemId,
    #[serde(rename = "type")]
    pub kind: MovementType,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub value: Decimal,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Movement {
    type Id = MovementId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// The `log` object sent to the backend when recording or editing a movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementPayload {
    #[serde(rename = "Classification")]
    pub classification: String,
    pub description: String,
    #[serde(rename = "productId")]
    pub product_id: StockItemId,
    #[serde(rename = "type")]
    pub kind: MovementType,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

impl From<&Movement> for MovementPayload {
    fn from(m: &Movement) -> Self {
        Self {
            classification: m.classification.clone(),
            description: m.description.clone(),
            product_id: m.product_id.clone(),
            kind: m.kind,
            value: m.value,
        }
    }
}
