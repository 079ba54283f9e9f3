//! Ledger collaborators.
//!
//! The engines never fetch data themselves. Callers read costs and sales
//! through these traits and hand the slices in.

pub mod error;
pub mod snapshot;

pub use error::SourceError;
pub use snapshot::{LedgerSnapshot, TenantLedger};

use equilibrio_shared::types::TenantId;

use crate::calendar::DateRange;
use crate::recurrence::CostDefinition;
use crate::stats::{ProductFilter, SaleRecord};

/// Storage-level pre-filter for sales.
///
/// Implementations may ignore it; the aggregator filters again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleQuery {
    /// Only sales inside this range.
    pub range: Option<DateRange>,
    /// Only sales of this product.
    pub product: ProductFilter,
}

/// Reads fixed cost definitions.
pub trait CostSource: Send + Sync {
    /// All cost definitions of `tenant`.
    fn costs(
        &self,
        tenant: &TenantId,
    ) -> impl std::future::Future<Output = Result<Vec<CostDefinition>, SourceError>> + Send;
}

/// Reads sale records.
pub trait SaleSource: Send + Sync {
    /// Sales of `tenant` matching `query`.
    fn sales(
        &self,
        tenant: &TenantId,
        query: &SaleQuery,
    ) -> impl std::future::Future<Output = Result<Vec<SaleRecord>, SourceError>> + Send;
}
