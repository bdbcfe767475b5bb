//! Storage error types

use core_kernel::ClaimId;
use core_tenancy::TenantError;
use domain_claims::ClaimError;
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found for the active tenant. Used uniformly for "does
    /// not exist" and "exists but belongs to another organization" so that
    /// existence is never revealed across tenants.
    #[error("entity not found: {0}")]
    NotFound(String),

    /// Tenancy violation: missing context or a cross-tenant ownership claim
    #[error(transparent)]
    Tenant(#[from] TenantError),

    /// Domain validation rejected the write
    #[error(transparent)]
    Invalid(#[from] ClaimError),

    /// The exclusive per-claim lock was not acquired within the bounded wait
    #[error("lock on claim {claim_id} not acquired within {waited_ms}ms")]
    LockTimeout { claim_id: ClaimId, waited_ms: u64 },
}

impl StoreError {
    /// Creates a not found error for a specific entity type and identifier
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        StoreError::NotFound(format!("{} with id '{}'", entity, id))
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    /// Returns true if this error indicates a transient failure that may
    /// succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::LockTimeout { .. })
    }
}
