//! Per-event terminal outcomes
//!
//! The observability boundary: every consumed event ends up here with a
//! terminal status and its attempt count, queryable by operators. An
//! exhausted or permanently failed event is visible, never silently
//! discarded.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, EventId};
use domain_claims::Transition;
use infra_queue::ClaimEvent;

/// Terminal status of a consumed event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Success,
    Failure,
}

/// The recorded terminal outcome of one event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventOutcome {
    pub event_id: EventId,
    pub claim_id: ClaimId,
    pub status: EventStatus,
    /// Delivery attempts consumed, including the terminal one
    pub attempts: u32,
    /// The transition that was applied, for successful events
    pub transition: Option<Transition>,
    /// Failure detail, for failed events
    pub detail: Option<String>,
    pub completed_at: DateTime<Utc>,
}

/// In-memory outcome registry
#[derive(Debug, Default)]
pub struct OutcomeStore {
    inner: RwLock<HashMap<EventId, EventOutcome>>,
}

impl OutcomeStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful event
    pub fn record_success(&self, event: &ClaimEvent, attempts: u32, transition: Transition) {
        self.insert(EventOutcome {
            event_id: event.id,
            claim_id: event.claim_id,
            status: EventStatus::Success,
            attempts,
            transition: Some(transition),
            detail: None,
            completed_at: Utc::now(),
        });
    }

    /// Records a permanently failed event
    pub fn record_failure(&self, event: &ClaimEvent, attempts: u32, detail: impl Into<String>) {
        self.insert(EventOutcome {
            event_id: event.id,
            claim_id: event.claim_id,
            status: EventStatus::Failure,
            attempts,
            transition: None,
            detail: Some(detail.into()),
            completed_at: Utc::now(),
        });
    }

    /// Looks up the outcome of an event
    pub fn get(&self, event_id: EventId) -> Option<EventOutcome> {
        self.inner
            .read()
            .expect("outcome store poisoned")
            .get(&event_id)
            .cloned()
    }

    /// All failed events, for operator inspection
    pub fn failures(&self) -> Vec<EventOutcome> {
        self.inner
            .read()
            .expect("outcome store poisoned")
            .values()
            .filter(|outcome| outcome.status == EventStatus::Failure)
            .cloned()
            .collect()
    }

    /// Total number of recorded outcomes
    pub fn len(&self) -> usize {
        self.inner.read().expect("outcome store poisoned").len()
    }

    /// True if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, outcome: EventOutcome) {
        self.inner
            .write()
            .expect("outcome store poisoned")
            .insert(outcome.event_id, outcome);
    }
}
