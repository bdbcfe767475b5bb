//! Application layer for the multi-tenant claims core
//!
//! Two entry points sit on top of the domain and infrastructure crates:
//!
//! - [`TransitionWorker`] consumes queued clinical events, re-establishes
//!   the tenant context from the event payload, and applies the status
//!   transition inside an exclusively locked, atomic unit - retrying
//!   transient failures with exponential backoff and recording a terminal
//!   outcome per event for operators.
//! - [`ClaimService`] is the synchronous path: it runs the permission gate
//!   before every gateway call, submits claims, applies direct status
//!   mutations, and turns clinical observations into queued events.

pub mod error;
pub mod results;
pub mod retry;
pub mod service;
pub mod worker;

pub use error::ServiceError;
pub use results::{EventOutcome, EventStatus, OutcomeStore};
pub use retry::RetryPolicy;
pub use service::{BulkUpdateOutcome, ClaimService};
pub use worker::{EventSource, Handled, TransitionReport, TransitionWorker};
