//! Test Utilities Crate
//!
//! Provides shared test infrastructure for the claims core test suite.
//!
//! # Modules
//!
//! - `fixtures`: pre-built organizations, scopes, and user sets
//! - `builders`: builder patterns for test data construction
//! - `generators`: fake-data generators for names, emails, and codes
//! - `tracing`: one-time tracing initialization for tests

pub mod builders;
pub mod fixtures;
pub mod generators;
pub mod tracing;

pub use builders::*;
pub use fixtures::*;
pub use generators::*;
pub use crate::tracing::init_tracing;
