//! Claims domain errors

use crate::claim::ClaimStatus;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the claims domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error("invalid status transition from {from:?} to {to:?}")]
    InvalidStatusTransition { from: ClaimStatus, to: ClaimStatus },

    #[error("claim in terminal status {0:?} cannot be modified")]
    TerminalStatus(ClaimStatus),

    #[error("{0} is not a valid ICD-10 diagnosis code")]
    InvalidDiagnosisCode(String),

    #[error("{0} is not a valid CPT procedure code")]
    InvalidProcedureCode(String),

    #[error("claim amount {0} is outside the accepted range")]
    InvalidAmount(Decimal),
}
