//! The active-tenant value

use core_kernel::{OrgId, UserId};
use serde::{Deserialize, Serialize};

/// The organization (and optionally the acting user) a unit of work runs as.
///
/// A `TenantContext` is an immutable value. It is created once at the start
/// of a unit of work - by the request boundary for synchronous callers, or
/// re-derived from the event payload by the transition worker - and carried
/// in a [`crate::TenantScope`] from there on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    organization: OrgId,
    acting_user: Option<UserId>,
}

impl TenantContext {
    /// Creates a context for the given organization
    pub fn new(organization: OrgId) -> Self {
        Self {
            organization,
            acting_user: None,
        }
    }

    /// Creates a context for an organization with a known acting user.
    /// The user id is carried for audit logging only; authorization is the
    /// permission gate's job.
    pub fn for_user(organization: OrgId, user: UserId) -> Self {
        Self {
            organization,
            acting_user: Some(user),
        }
    }

    /// The organization this context is scoped to
    pub fn organization(&self) -> OrgId {
        self.organization
    }

    /// The acting user, if one is known
    pub fn acting_user(&self) -> Option<UserId> {
        self.acting_user
    }
}
