//! Property-Based Test Generators
//!
//! Proptest strategies that keep domain invariants, plus fake-data helpers
//! for identity fields where the exact value does not matter.

use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_claims::{ClaimStatus, ClinicalEventType, Role};

/// Strategy for generating valid claim statuses
pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Submitted),
        Just(ClaimStatus::UnderReview),
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Rejected),
        Just(ClaimStatus::Paid),
    ]
}

/// Strategy for generating clinical event types
pub fn event_type_strategy() -> impl Strategy<Value = ClinicalEventType> {
    prop_oneof![
        Just(ClinicalEventType::PatientAdmission),
        Just(ClinicalEventType::PatientDischarge),
        Just(ClinicalEventType::TreatmentInitiated),
    ]
}

/// Strategy for generating caller roles
pub fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Admin),
        Just(Role::ClaimsProcessor),
        Just(Role::Provider),
        Just(Role::Patient),
    ]
}

/// Strategy for generating valid ICD-10 diagnosis codes
pub fn diagnosis_code_strategy() -> impl Strategy<Value = String> {
    ("[A-Z]", 0u8..100u8, proptest::option::of(0u8..10u8)).prop_map(|(letter, num, sub)| {
        match sub {
            Some(sub) => format!("{letter}{num:02}.{sub}"),
            None => format!("{letter}{num:02}"),
        }
    })
}

/// Strategy for generating valid five-digit CPT procedure codes
pub fn procedure_code_strategy() -> impl Strategy<Value = String> {
    (0u32..100_000u32).prop_map(|n| format!("{n:05}"))
}

/// Strategy for generating claim amounts within the accepted range
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (100i64..=1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// A random person name for display fields
pub fn fake_name() -> String {
    Name().fake()
}

/// A random, well-formed email address
pub fn fake_email() -> String {
    SafeEmail().fake()
}
