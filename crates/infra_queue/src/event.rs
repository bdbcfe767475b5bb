//! Claim lifecycle events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, EventId, OrgId};
use domain_claims::ClinicalEventType;

/// An immutable message representing a real-world clinical occurrence.
///
/// The event carries the owning organization id so that a worker can
/// re-derive the tenant context for its unit of work; it never grants
/// access beyond that organization. The event id doubles as the
/// delivery-idempotency key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimEvent {
    pub id: EventId,
    pub event_type: ClinicalEventType,
    pub claim_id: ClaimId,
    pub organization: OrgId,
    pub occurred_at: DateTime<Utc>,
    /// Treatment description for `treatment_initiated` events
    pub treatment_type: Option<String>,
}

impl ClaimEvent {
    /// Creates an event for a claim
    pub fn new(
        event_type: ClinicalEventType,
        claim_id: ClaimId,
        organization: OrgId,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EventId::new_v7(),
            event_type,
            claim_id,
            organization,
            occurred_at,
            treatment_type: None,
        }
    }

    /// Attaches the treatment description carried by a
    /// `treatment_initiated` event
    pub fn with_treatment_type(mut self, treatment_type: impl Into<String>) -> Self {
        self.treatment_type = Some(treatment_type.into());
        self
    }
}

/// One delivery of an event to a worker, with its attempt number.
/// The first delivery has `attempt == 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub event: ClaimEvent,
    pub attempt: u32,
}

impl Delivery {
    /// Wraps an event for its first delivery
    pub fn first(event: ClaimEvent) -> Self {
        Self { event, attempt: 1 }
    }
}
