//! Organization entity and the tenant-scoped capability trait

use chrono::{DateTime, Utc};
use core_kernel::OrgId;
use serde::{Deserialize, Serialize};

/// An isolated tenant of the shared deployment.
///
/// Organizations are created at onboarding and immutable thereafter; they
/// are never deleted while claims reference them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrgId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Organization {
    /// Creates a new organization at onboarding
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: OrgId::new_v7(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

/// Capability carried by every tenant-scoped entity: a mandatory,
/// immutable reference to exactly one owning organization.
///
/// No entity implementing this trait is ever visible, readable, or
/// writable outside the organization it belongs to; the data gateway
/// enforces that by filtering every operation on `organization()`.
pub trait TenantScoped {
    /// The organization that owns this entity
    fn organization(&self) -> OrgId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_ids_are_unique() {
        let a = Organization::new("Acme Health");
        let b = Organization::new("Acme Health");
        assert_ne!(a.id, b.id);
    }
}
