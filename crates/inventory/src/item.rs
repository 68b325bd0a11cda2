use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use stockledger_core::{DomainError, DomainResult, Entity, StockItemId};

/// Items at or below this quantity are flagged as low stock.
pub const LOW_STOCK_THRESHOLD: u64 = 5;

/// Stock item as listed by `GET /product`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    #[serde(rename = "_id")]
    pub id: StockItemId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(deserialize_with = "whole_number")]
    pub quantity: u64,
}

impl StockItem {
    /// Inventory value of this line (`price × quantity`).
    ///
    /// Fails when the product does not fit in a `Decimal`.
    pub fn value(&self) -> DomainResult<Decimal> {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| DomainError::validation(format!("value of {} is too large", self.name)))
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity <= LOW_STOCK_THRESHOLD
    }
}

impl Entity for StockItem {
    type Id = StockItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Non-negative integer that may be sent as `5` or `5.0`.
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    struct WholeNumber;

    impl serde::de::Visitor<'_> for WholeNumber {
        type Value = u64;

        fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("a non-negative whole number")
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::invalid_value(serde::de::Unexpected::Signed(v), &self))
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<u64, E> {
            // 2^64 itself is not representable as u64.
            if v.fract() == 0.0 && v >= 0.0 && v < 18_446_744_073_709_551_616.0 {
                Ok(v as u64)
            } else {
                Err(E::invalid_value(serde::de::Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_any(WholeNumber)
}

/// Body of `POST /product` and `PUT /product/{id}`.
///
/// Only constructible through [`NewStockItem::new`] or [`NewStockItem::parse`],
/// so a value of this type always satisfies the non-empty name and
/// non-negative price invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewStockItem {
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    quantity: u64,
}

impl NewStockItem {
    pub fn new(name: impl Into<String>, price: Decimal, quantity: u64) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if price.is_sign_negative() && !price.is_zero() {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(Self {
            name,
            price,
            quantity,
        })
    }

    /// Validate raw form input (name, price, quantity as typed by the user).
    pub fn parse(name: &str, price: &str, quantity: &str) -> DomainResult<Self> {
        let price = price.trim();
        let quantity = quantity.trim();
        if price.is_empty() || quantity.is_empty() {
            return Err(DomainError::validation("name, price and quantity are required"));
        }

        let price = Decimal::from_str(price)
            .map_err(|_| DomainError::validation(format!("price is not a number: {price}")))?;

        let quantity = match quantity.parse::<i128>() {
            Ok(q) if q < 0 => return Err(DomainError::validation("quantity cannot be negative")),
            Ok(q) => u64::try_from(q)
                .map_err(|_| DomainError::validation("quantity is too large"))?,
            Err(_) => {
                return Err(DomainError::validation(format!(
                    "quantity must be a whole number: {quantity}"
                )));
            }
        };

        Self::new(name, price, quantity)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }
}

impl From<&StockItem> for NewStockItem {
    fn from(item: &StockItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
        }
    }
}
