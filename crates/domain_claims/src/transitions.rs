//! Clinical-event transition table
//!
//! The asynchronous pipeline advances a claim's status as clinical events
//! occur. Delivery is at-least-once and unordered across claims, so this
//! table is written for redelivery: an event whose source-state
//! precondition does not match the claim's current status is treated as
//! already satisfied and ignored. A stale or duplicate event never errors
//! and never corrupts state.
//!
//! | Event               | Valid source | Result                              |
//! |---------------------|--------------|-------------------------------------|
//! | patient_admission   | Submitted    | UnderReview                         |
//! | treatment_initiated | UnderReview  | UnderReview, records treatment type |
//! | patient_discharge   | UnderReview  | Approved                            |

use serde::{Deserialize, Serialize};

use crate::claim::{Claim, ClaimStatus};

/// The real-world occurrences that drive claim transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicalEventType {
    PatientAdmission,
    PatientDischarge,
    TreatmentInitiated,
}

/// Result of applying a clinical event to a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// The event matched its precondition and the claim was mutated
    Applied { from: ClaimStatus, to: ClaimStatus },
    /// The precondition did not hold; the claim is untouched
    Ignored { status: ClaimStatus },
}

impl Transition {
    /// Returns true if the claim was mutated
    pub fn was_applied(&self) -> bool {
        matches!(self, Transition::Applied { .. })
    }
}

/// Applies a clinical event to a claim per the transition table.
///
/// `treatment_type` is only consulted for `TreatmentInitiated` events.
/// Applying the same event twice yields the same final claim state as
/// applying it once.
pub fn apply_clinical_event(
    claim: &mut Claim,
    event: ClinicalEventType,
    treatment_type: Option<&str>,
) -> Transition {
    let from = claim.status;
    match (event, from) {
        (ClinicalEventType::PatientAdmission, ClaimStatus::Submitted) => {
            claim.status = ClaimStatus::UnderReview;
            claim.updated_at = chrono::Utc::now();
            Transition::Applied {
                from,
                to: ClaimStatus::UnderReview,
            }
        }
        (ClinicalEventType::TreatmentInitiated, ClaimStatus::UnderReview) => {
            // Status stays put; the event records what treatment started.
            claim.treatment_type = treatment_type.map(str::to_owned);
            claim.updated_at = chrono::Utc::now();
            Transition::Applied {
                from,
                to: ClaimStatus::UnderReview,
            }
        }
        (ClinicalEventType::PatientDischarge, ClaimStatus::UnderReview) => {
            claim.status = ClaimStatus::Approved;
            claim.approval_reason = Some("Auto-finalized on patient discharge".to_owned());
            claim.updated_at = chrono::Utc::now();
            Transition::Applied {
                from,
                to: ClaimStatus::Approved,
            }
        }
        _ => Transition::Ignored { status: from },
    }
}
