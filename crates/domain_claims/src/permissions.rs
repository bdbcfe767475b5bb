//! Permission gate
//!
//! A pure function over `(role, action, claim, caller organization)`.
//! It is evaluated before any gateway mutation call; a mutation reaching
//! the gateway without passing here first is a security defect, not a
//! normal error path.
//!
//! Cross-organization access is denied here even though the gateway would
//! filter it out anyway - permission denial must not depend on the
//! gateway's tenant filter being the only line of defense.

use thiserror::Error;
use tracing::warn;

use crate::claim::Claim;
use crate::user::{Role, User};

/// Actions a caller may attempt against claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Read a claim or list claims
    Read,
    /// Submit a new claim
    Create,
    /// Directly mutate a claim's status
    UpdateStatus,
}

/// Authorization failure, surfaced to the caller as a boundary-level
/// rejection and never retried
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    #[error("permission denied: {role:?} may not perform {action:?}")]
    Denied { role: Role, action: Action },
}

/// Authorizes an action. `claim` is `None` for capability checks that
/// happen before any object exists (claim submission, or the pre-fetch
/// check on a mutating request).
pub fn authorize(user: &User, action: Action, claim: Option<&Claim>) -> Result<(), PermissionError> {
    if is_allowed(user, action, claim) {
        return Ok(());
    }
    warn!(
        user = %user.id,
        role = ?user.role,
        action = ?action,
        claim = claim.map(|c| c.id.to_string()),
        "permission denied"
    );
    Err(PermissionError::Denied {
        role: user.role,
        action,
    })
}

fn is_allowed(user: &User, action: Action, claim: Option<&Claim>) -> bool {
    if !user.is_active {
        return false;
    }

    // Defense-in-depth: a claim owned by another organization is denied
    // outright, whatever the role says.
    if let Some(claim) = claim {
        if claim.organization != user.organization {
            return false;
        }
    }

    match (user.role, action) {
        // Admins have full access within their organization
        (Role::Admin, _) => true,

        // Processors work the claims assigned to them
        (Role::ClaimsProcessor, Action::Create) => true,
        (Role::ClaimsProcessor, Action::Read | Action::UpdateStatus) => match claim {
            Some(claim) => claim.assigned_processor == Some(user.id),
            None => true, // capability check; object check follows the fetch
        },

        // Providers submit claims and read the ones they provided
        (Role::Provider, Action::Create) => true,
        (Role::Provider, Action::Read) => match claim {
            Some(claim) => claim.provider_id == user.id,
            None => true,
        },
        (Role::Provider, Action::UpdateStatus) => false,

        // Patients read their own claims, nothing else
        (Role::Patient, Action::Read) => match claim {
            Some(claim) => user.patient_id == Some(claim.patient_id),
            None => true,
        },
        (Role::Patient, Action::Create | Action::UpdateStatus) => false,
    }
}
