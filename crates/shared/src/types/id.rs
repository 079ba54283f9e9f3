//! Typed IDs for references handed over by the external ledger.
//!
//! The persistence layer owns identity, so IDs are opaque strings here.
//! Wrapping them keeps a `ProductId` from being passed where a `TenantId`
//! is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers around an opaque string.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw identifier.
            #[must_use]
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Returns the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::new(raw)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

typed_id!(TenantId, "Business (tenant) whose ledger is being aggregated.");
typed_id!(ProductId, "Product referenced by a sale.");
typed_id!(CostId, "Recurring fixed cost definition.");
typed_id!(SaleId, "Sale transaction in the ledger.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_is_raw_value() {
        let id = ProductId::new("65a1f0c2e4b0");
        assert_eq!(id.to_string(), "65a1f0c2e4b0");
        assert_eq!(id.as_str(), "65a1f0c2e4b0");
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = TenantId::from("bakery");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"bakery\"");

        let parsed: TenantId = serde_json::from_str("\"bakery\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_ids_compare_by_value() {
        assert_eq!(SaleId::new("a"), SaleId::from(String::from("a")));
        assert!(CostId::new("a") < CostId::new("b"));
    }
}
