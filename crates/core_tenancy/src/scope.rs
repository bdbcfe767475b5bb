//! Per-unit-of-work tenant scope
//!
//! A [`TenantScope`] is the holder of the active [`TenantContext`] for one
//! unit of work: one synchronous request, or one delivered event in a
//! worker. The data gateway takes a `&TenantScope` on every call and fails
//! with [`TenantError::NoTenantContext`] when the scope is empty, so no
//! tenant-scoped read or write can happen without an established context.
//!
//! The scope is a plain value. When it is dropped - on success, error, or
//! cancellation - the context is gone with it, which is what guarantees a
//! reused execution slot never observes a previous unit of work's tenant.

use crate::context::TenantContext;
use crate::error::TenantError;
use core_kernel::OrgId;

/// Holder of the active tenant context for one unit of work
#[derive(Debug, Default)]
pub struct TenantScope {
    context: Option<TenantContext>,
}

impl TenantScope {
    /// Begins a unit of work with an established tenant context
    pub fn begin(context: TenantContext) -> Self {
        Self {
            context: Some(context),
        }
    }

    /// Creates an empty scope, as exists before a caller is authenticated.
    /// Gateway calls against an empty scope fail with `NoTenantContext`.
    pub fn empty() -> Self {
        Self { context: None }
    }

    /// Establishes the active tenant for this unit of work
    pub fn set(&mut self, context: TenantContext) {
        self.context = Some(context);
    }

    /// Removes the active tenant. Dropping the scope has the same effect;
    /// this exists for boundaries that end a unit of work explicitly.
    pub fn clear(&mut self) {
        self.context = None;
    }

    /// Returns the active context, or fails if none was established
    pub fn current(&self) -> Result<&TenantContext, TenantError> {
        self.context.as_ref().ok_or(TenantError::NoTenantContext)
    }

    /// The organization this unit of work is scoped to
    pub fn organization(&self) -> Result<OrgId, TenantError> {
        self.current().map(|ctx| ctx.organization())
    }

    /// Verifies that a caller-supplied organization id matches the active
    /// context. Used by the gateway to reject untrusted ownership claims.
    pub fn verify_ownership(&self, provided: OrgId) -> Result<(), TenantError> {
        let context = self.organization()?;
        if provided != context {
            return Err(TenantError::TenantMismatch { context, provided });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scope_has_no_context() {
        let scope = TenantScope::empty();
        assert_eq!(scope.current().unwrap_err(), TenantError::NoTenantContext);
        assert_eq!(
            scope.organization().unwrap_err(),
            TenantError::NoTenantContext
        );
    }

    #[test]
    fn test_begin_establishes_context() {
        let org = OrgId::new();
        let scope = TenantScope::begin(TenantContext::new(org));
        assert_eq!(scope.organization().unwrap(), org);
    }

    #[test]
    fn test_set_and_clear() {
        let org = OrgId::new();
        let mut scope = TenantScope::empty();
        scope.set(TenantContext::new(org));
        assert_eq!(scope.organization().unwrap(), org);

        scope.clear();
        assert_eq!(scope.current().unwrap_err(), TenantError::NoTenantContext);
    }

    #[test]
    fn test_verify_ownership_accepts_matching_org() {
        let org = OrgId::new();
        let scope = TenantScope::begin(TenantContext::new(org));
        assert!(scope.verify_ownership(org).is_ok());
    }

    #[test]
    fn test_verify_ownership_rejects_foreign_org() {
        let org = OrgId::new();
        let other = OrgId::new();
        let scope = TenantScope::begin(TenantContext::new(org));

        let err = scope.verify_ownership(other).unwrap_err();
        assert!(err.is_mismatch());
    }

    #[test]
    fn test_verify_ownership_requires_context() {
        let scope = TenantScope::empty();
        assert_eq!(
            scope.verify_ownership(OrgId::new()).unwrap_err(),
            TenantError::NoTenantContext
        );
    }
}
