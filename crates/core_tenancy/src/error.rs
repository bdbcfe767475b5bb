//! Tenancy errors

use core_kernel::OrgId;
use thiserror::Error;

/// Errors raised by the tenant-isolation layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TenantError {
    /// A gateway call was made before a tenant context was established.
    /// This is a programmer error and should never reach production paths.
    #[error("no tenant context established for this unit of work")]
    NoTenantContext,

    /// Untrusted input tried to assert ownership by a different organization
    /// than the active context. Logged as a potential probe by callers.
    #[error("tenant mismatch: context is {context}, input claimed {provided}")]
    TenantMismatch { context: OrgId, provided: OrgId },
}

impl TenantError {
    /// Returns true if this error indicates a cross-tenant ownership probe
    pub fn is_mismatch(&self) -> bool {
        matches!(self, TenantError::TenantMismatch { .. })
    }
}
