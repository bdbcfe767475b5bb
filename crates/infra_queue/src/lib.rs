//! Event task queue infrastructure
//!
//! Carries claim lifecycle events from the synchronous intake path to the
//! transition workers. Delivery is at-least-once: consumers must tolerate
//! duplicates and reordering across claims, which the domain's idempotent
//! transition table is designed for.

pub mod event;
pub mod queue;

pub use event::{ClaimEvent, Delivery};
pub use queue::EventQueue;
