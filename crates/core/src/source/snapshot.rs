//! In-memory ledger.

use std::collections::BTreeMap;

use equilibrio_shared::types::TenantId;
use serde::{Deserialize, Serialize};

use super::error::SourceError;
use super::{CostSource, SaleQuery, SaleSource};
use crate::recurrence::CostDefinition;
use crate::stats::SaleRecord;

/// One tenant's costs and sales.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenantLedger {
    /// Fixed cost definitions.
    #[serde(default)]
    pub costs: Vec<CostDefinition>,
    /// Sale records.
    #[serde(default)]
    pub sales: Vec<SaleRecord>,
}

/// Ledgers keyed by tenant, typically loaded from a JSON export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Ledger per tenant.
    pub tenants: BTreeMap<TenantId, TenantLedger>,
}

impl LedgerSnapshot {
    /// Adds or replaces the ledger of `tenant`.
    #[must_use]
    pub fn with_tenant(mut self, tenant: impl Into<TenantId>, ledger: TenantLedger) -> Self {
        self.tenants.insert(tenant.into(), ledger);
        self
    }

    fn ledger(&self, tenant: &TenantId) -> Result<&TenantLedger, SourceError> {
        self.tenants
            .get(tenant)
            .ok_or_else(|| SourceError::TenantNotFound(tenant.clone()))
    }
}

impl CostSource for LedgerSnapshot {
    async fn costs(&self, tenant: &TenantId) -> Result<Vec<CostDefinition>, SourceError> {
        Ok(self.ledger(tenant)?.costs.clone())
    }
}

impl SaleSource for LedgerSnapshot {
    async fn sales(
        &self,
        tenant: &TenantId,
        query: &SaleQuery,
    ) -> Result<Vec<SaleRecord>, SourceError> {
        Ok(self
            .ledger(tenant)?
            .sales
            .iter()
            .filter(|sale| match (query.range, sale.date) {
                (Some(range), Some(date)) => range.contains(date),
                _ => true,
            })
            .filter(|sale| query.product.matches(sale))
            .cloned()
            .collect())
    }
}
