//! Storage infrastructure for tenant-scoped claim data
//!
//! [`ClaimStore`] is the single enforcement point for tenant isolation:
//! every read and write resolves the owning organization from the caller's
//! [`core_tenancy::TenantScope`] and filters on it. No other code path -
//! synchronous handlers and background workers alike - touches claim rows.
//!
//! The store also owns the serialize-per-key primitive: an exclusive
//! per-claim lock with a bounded acquisition wait, handed out as a
//! [`ClaimGuard`] whose commit/rollback semantics make a claim mutation a
//! single atomic unit.

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::{ClaimGuard, ClaimStore, StoreConfig};
