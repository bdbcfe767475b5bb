//! Claim list filtering

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{PatientId, UserId};

use crate::claim::{Claim, ClaimStatus};

/// Optional criteria applied to claim listings. All criteria must hold for
/// a claim to match; an empty filter matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimFilter {
    pub status: Option<ClaimStatus>,
    pub patient_id: Option<PatientId>,
    pub provider_id: Option<UserId>,
    pub service_from: Option<NaiveDate>,
    pub service_to: Option<NaiveDate>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

impl ClaimFilter {
    /// A filter that matches every claim
    pub fn any() -> Self {
        Self::default()
    }

    /// A filter on status only
    pub fn with_status(status: ClaimStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// A filter on patient only
    pub fn for_patient(patient_id: PatientId) -> Self {
        Self {
            patient_id: Some(patient_id),
            ..Self::default()
        }
    }

    /// Returns true if the claim satisfies every set criterion
    pub fn matches(&self, claim: &Claim) -> bool {
        if self.status.is_some_and(|s| claim.status != s) {
            return false;
        }
        if self.patient_id.is_some_and(|p| claim.patient_id != p) {
            return false;
        }
        if self.provider_id.is_some_and(|p| claim.provider_id != p) {
            return false;
        }
        if self.service_from.is_some_and(|d| claim.service_date < d) {
            return false;
        }
        if self.service_to.is_some_and(|d| claim.service_date > d) {
            return false;
        }
        if self.min_amount.is_some_and(|a| claim.amount < a) {
            return false;
        }
        if self.max_amount.is_some_and(|a| claim.amount > a) {
            return false;
        }
        true
    }
}
