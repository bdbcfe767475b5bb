//! Claims Management Domain
//!
//! This crate implements the claim aggregate and everything that governs
//! how its status may change:
//!
//! - the clinical-event transition table (admission, treatment, discharge)
//!   with idempotent no-op handling of stale or duplicate events
//! - the direct-mutation transition matrix used by permission-gated callers
//! - the role-based permission gate
//! - ICD-10 / CPT / amount validation for claim submission
//!
//! # Claim Lifecycle
//!
//! ```text
//! Submitted -> UnderReview -> Approved -> Paid
//!                   \-> Rejected
//! ```
//!
//! The event pipeline only ever drives `Submitted -> UnderReview ->
//! Approved`; `Rejected` and `Paid` are reachable through direct mutation
//! only.

pub mod claim;
pub mod error;
pub mod filter;
pub mod patient;
pub mod permissions;
pub mod transitions;
pub mod user;
pub mod validation;

pub use claim::{Claim, ClaimStatus, NewClaim};
pub use error::ClaimError;
pub use filter::ClaimFilter;
pub use patient::Patient;
pub use permissions::{authorize, Action, PermissionError};
pub use transitions::{apply_clinical_event, ClinicalEventType, Transition};
pub use user::{Role, User};
