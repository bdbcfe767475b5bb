//! Tenancy - the tenant-isolation contract
//!
//! This crate defines the types that carry "which organization is acting"
//! through the system:
//!
//! - [`TenantContext`] - an immutable value naming the active organization
//! - [`TenantScope`] - the per-unit-of-work holder of that context, released
//!   on every exit path by drop semantics
//! - [`TenantScoped`] - the capability trait every tenant-owned entity
//!   implements
//!
//! The context is an explicit value passed into every gateway call, never a
//! mutable global. A reused worker slot therefore cannot leak one tenant's
//! context into the next unit of work.

pub mod context;
pub mod error;
pub mod organization;
pub mod scope;

pub use context::TenantContext;
pub use error::TenantError;
pub use organization::{Organization, TenantScoped};
pub use scope::TenantScope;
