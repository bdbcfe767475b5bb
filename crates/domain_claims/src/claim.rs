//! Claim aggregate

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, OrgId, PatientId, UserId};
use core_tenancy::TenantScoped;

use crate::error::ClaimError;
use crate::validation;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Newly submitted, not yet picked up
    Submitted,
    /// Under review by a claims processor
    UnderReview,
    /// Approved for payment
    Approved,
    /// Rejected after review
    Rejected,
    /// Paid out and closed
    Paid,
}

impl ClaimStatus {
    /// Returns true if no further direct mutation is permitted from this
    /// status. `Approved` is not terminal: it may still move to `Paid`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Rejected | ClaimStatus::Paid)
    }
}

/// An insurance claim owned by exactly one organization.
///
/// The owning organization is set at creation and never reassigned; the
/// data gateway filters every access on it. Status changes go through
/// [`Claim::update_status`] (direct, permission-gated mutation) or through
/// the clinical-event table in [`crate::transitions`] (worker pipeline).
/// Claims are audit-significant and never hard-deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    /// Owning organization, immutable after creation
    pub organization: OrgId,
    /// Patient the claim is for
    pub patient_id: PatientId,
    /// Provider who submitted the claim
    pub provider_id: UserId,
    /// Processor assigned to work the claim
    pub assigned_processor: Option<UserId>,
    /// Current status
    pub status: ClaimStatus,
    /// ICD-10 diagnosis code
    pub diagnosis_code: String,
    /// CPT procedure code
    pub procedure_code: Option<String>,
    /// Claimed amount
    pub amount: Decimal,
    /// Date the claim was submitted
    pub submitted_date: NaiveDate,
    /// Date of service
    pub service_date: NaiveDate,
    /// Reason recorded when the claim was approved
    pub approval_reason: Option<String>,
    /// Reason recorded when the claim was rejected
    pub rejection_reason: Option<String>,
    /// Treatment recorded by a treatment_initiated event
    pub treatment_type: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied data for submitting a claim.
///
/// `organization` is untrusted input: the gateway rejects it when it names
/// any organization other than the active tenant context, and the stored
/// claim always derives its owner from the context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClaim {
    pub organization: Option<OrgId>,
    pub patient_id: PatientId,
    pub provider_id: UserId,
    pub diagnosis_code: String,
    pub procedure_code: Option<String>,
    pub amount: Decimal,
    pub submitted_date: NaiveDate,
    pub service_date: NaiveDate,
}

impl Claim {
    /// Creates a submitted claim owned by the given organization.
    ///
    /// Validates diagnosis/procedure codes and the amount; the organization
    /// argument must already have been derived from the tenant context.
    pub fn submit(organization: OrgId, details: NewClaim) -> Result<Self, ClaimError> {
        validation::validate_diagnosis_code(&details.diagnosis_code)?;
        if let Some(code) = &details.procedure_code {
            validation::validate_procedure_code(code)?;
        }
        validation::validate_amount(details.amount)?;

        let now = Utc::now();
        Ok(Self {
            id: ClaimId::new_v7(),
            organization,
            patient_id: details.patient_id,
            provider_id: details.provider_id,
            assigned_processor: None,
            status: ClaimStatus::Submitted,
            diagnosis_code: details.diagnosis_code,
            procedure_code: details.procedure_code,
            amount: details.amount,
            submitted_date: details.submitted_date,
            service_date: details.service_date,
            approval_reason: None,
            rejection_reason: None,
            treatment_type: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a direct status mutation.
    ///
    /// Direct mutation follows a stricter matrix than the event pipeline:
    /// an out-of-order request here is a caller error, not a redelivered
    /// message, so it fails instead of no-opping.
    pub fn update_status(
        &mut self,
        status: ClaimStatus,
        reason: Option<&str>,
    ) -> Result<(), ClaimError> {
        if self.status.is_terminal() {
            return Err(ClaimError::TerminalStatus(self.status));
        }
        if !self.can_transition_to(status) {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.status,
                to: status,
            });
        }

        match status {
            ClaimStatus::Approved => self.approval_reason = reason.map(str::to_owned),
            ClaimStatus::Rejected => self.rejection_reason = reason.map(str::to_owned),
            _ => {}
        }
        self.status = status;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Assigns a processor to work the claim
    pub fn assign_processor(&mut self, processor: UserId) {
        self.assigned_processor = Some(processor);
        self.updated_at = Utc::now();
    }

    /// Checks if a direct transition is valid
    fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (self.status, target),
            (Submitted, UnderReview)
                | (UnderReview, Approved)
                | (UnderReview, Rejected)
                | (Approved, Paid)
        )
    }
}

impl TenantScoped for Claim {
    fn organization(&self) -> OrgId {
        self.organization
    }
}
