//! Users and roles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{OrgId, PatientId, UserId};
use core_tenancy::TenantScoped;

/// Caller roles recognized by the permission gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    ClaimsProcessor,
    Provider,
    Patient,
}

/// A caller identity. Users belong to exactly one organization and can
/// act only within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub organization: OrgId,
    pub email: String,
    pub role: Role,
    /// For `Role::Patient` users, the patient record they correspond to
    pub patient_id: Option<PatientId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a user with the given role
    pub fn new(organization: OrgId, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new_v7(),
            organization,
            email: email.into(),
            role,
            patient_id: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Creates a patient-role user linked to a patient record
    pub fn patient(organization: OrgId, email: impl Into<String>, patient_id: PatientId) -> Self {
        let mut user = Self::new(organization, email, Role::Patient);
        user.patient_id = Some(patient_id);
        user
    }
}

impl TenantScoped for User {
    fn organization(&self) -> OrgId {
        self.organization
    }
}
