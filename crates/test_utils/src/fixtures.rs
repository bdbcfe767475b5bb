//! Pre-built Test Fixtures
//!
//! Ready-to-use organizations, users, and claims for the claims core test
//! suites. Fixtures are predictable; anything randomized lives in
//! [`crate::generators`].

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{OrgId, PatientId, UserId};
use core_tenancy::{Organization, TenantContext, TenantScope};
use domain_claims::{NewClaim, Patient, Role, User};

use crate::generators;

/// Fixture for organization test data
pub struct OrgFixtures;

impl OrgFixtures {
    /// A hospital tenant
    pub fn acme_health() -> Organization {
        Organization::new("Acme Health")
    }

    /// A second, unrelated tenant for isolation tests
    pub fn rival_care() -> Organization {
        Organization::new("Rival Care")
    }
}

/// Fixture for user test data
pub struct UserFixtures;

impl UserFixtures {
    /// An active admin for the given organization
    pub fn admin(organization: OrgId) -> User {
        User::new(organization, "admin@example.com", Role::Admin)
    }

    /// An active claims processor for the given organization
    pub fn processor(organization: OrgId) -> User {
        User::new(organization, "processor@example.com", Role::ClaimsProcessor)
    }

    /// An active provider for the given organization
    pub fn provider(organization: OrgId) -> User {
        User::new(organization, "provider@example.com", Role::Provider)
    }

    /// An active patient-role user linked to a patient record
    pub fn patient(organization: OrgId, patient_id: PatientId) -> User {
        User::patient(organization, "patient@example.com", patient_id)
    }
}

/// Fixture for patient records
pub struct PatientFixtures;

impl PatientFixtures {
    /// A registered patient with randomized identity fields
    pub fn registered(organization: OrgId) -> Patient {
        Patient::new(
            organization,
            generators::fake_name(),
            generators::fake_name(),
            NaiveDate::from_ymd_opt(1985, 7, 4).unwrap(),
            generators::fake_email(),
            "555-0100",
        )
    }
}

/// Fixture for tenant scopes
pub struct ScopeFixtures;

impl ScopeFixtures {
    /// A scope bound to the given organization with no acting user
    pub fn for_org(organization: OrgId) -> TenantScope {
        TenantScope::begin(TenantContext::new(organization))
    }

    /// A scope bound to the given user's organization
    pub fn for_user(user: &User) -> TenantScope {
        TenantScope::begin(TenantContext::for_user(user.organization, user.id))
    }
}

/// Fixture for claim submission data
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// A valid claim submission with no organization hint
    pub fn new_claim(patient_id: PatientId, provider_id: UserId) -> NewClaim {
        NewClaim {
            organization: None,
            patient_id,
            provider_id,
            diagnosis_code: "A01.1".to_string(),
            procedure_code: Some("99213".to_string()),
            amount: dec!(1250.00),
            submitted_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            service_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        }
    }
}
