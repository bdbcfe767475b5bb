//! Patient entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{OrgId, PatientId};
use core_tenancy::TenantScoped;

/// A patient claims are filed for. Tenant-scoped like every other record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub organization: OrgId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub phone: String,
}

impl Patient {
    /// Registers a patient under the given organization
    pub fn new(
        organization: OrgId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: NaiveDate,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: PatientId::new_v7(),
            organization,
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth,
            email: email.into(),
            phone: phone.into(),
        }
    }
}

impl TenantScoped for Patient {
    fn organization(&self) -> OrgId {
        self.organization
    }
}
