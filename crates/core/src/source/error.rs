//! Source error types.

use equilibrio_shared::types::TenantId;
use thiserror::Error;

/// Errors raised while fetching ledger data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    /// No ledger exists for the tenant.
    #[error("tenant not found: {0}")]
    TenantNotFound(TenantId),
}
