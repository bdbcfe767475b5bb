//! Core Kernel - Foundational types for the multi-tenant claims system
//!
//! This crate provides the strongly-typed identifiers shared by every
//! domain and infrastructure module. Keeping them in one leaf crate
//! prevents dependency cycles between the tenancy, domain, and worker
//! layers.

pub mod identifiers;

pub use identifiers::{ClaimId, EventId, OrgId, PatientId, UserId};
