//! Application-layer errors

use core_tenancy::TenantError;
use domain_claims::{ClaimError, PermissionError};
use infra_store::StoreError;
use thiserror::Error;

/// Errors surfaced to synchronous callers.
///
/// A caller sees success, an authorization rejection, or not-found; retry
/// mechanics never leak through this type.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Permission(#[from] PermissionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Claim(#[from] ClaimError),
}

impl From<TenantError> for ServiceError {
    fn from(err: TenantError) -> Self {
        ServiceError::Store(StoreError::from(err))
    }
}

impl ServiceError {
    /// True if the caller asked for something that does not exist for
    /// their tenant
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Store(err) if err.is_not_found())
    }

    /// True if the permission gate rejected the caller
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, ServiceError::Permission(_))
    }
}
