//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are assigned by the backend and treated as opaque strings.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a stock item (product record).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockItemId(String);

/// Identifier of a movement (order / log entry).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovementId(String);

macro_rules! impl_opaque_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a server-assigned identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: empty", $name)));
                }
                Ok(Self(trimmed.to_string()))
            }
        }
    };
}

impl_opaque_id!(StockItemId, "StockItemId");
impl_opaque_id!(MovementId, "MovementId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_rejects_empty() {
        let id: StockItemId = "  abc123 ".parse().unwrap();
        assert_eq!(id.as_str(), "abc123");

        let err = "   ".parse::<MovementId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(msg) if msg.contains("MovementId")));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = StockItemId::new("65f0c2");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"65f0c2\"");
        let back: StockItemId = serde_json::from_str("\"65f0c2\"").unwrap();
        assert_eq!(back, id);
    }
}
