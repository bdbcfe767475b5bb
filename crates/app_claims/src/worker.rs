//! Claim transition worker
//!
//! For each delivered event the worker:
//!
//! 1. re-derives the tenant context from the event's organization id
//! 2. acquires the claim's exclusive lock for one atomic unit of work
//!    (acquisition is tenant-scoped, so a cross-tenant event can never
//!    lock another organization's claim)
//! 3. applies the clinical-event transition table, which turns stale and
//!    duplicate deliveries into no-ops
//! 4. commits, or rolls back by dropping the guard
//!
//! The tenant scope is dropped on every exit path. A missing or
//! cross-tenant claim is a permanent failure - redelivery cannot fix it.
//! Lock timeouts and storage contention are transient and retried with
//! exponential backoff up to the policy's attempt limit, after which the
//! event is recorded as permanently failed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use core_tenancy::{TenantContext, TenantScope};
use domain_claims::{apply_clinical_event, Transition};
use infra_queue::{ClaimEvent, Delivery, EventQueue};
use infra_store::ClaimStore;

use crate::results::OutcomeStore;
use crate::retry::RetryPolicy;

/// Source of event deliveries - the boundary to the queue infrastructure.
///
/// `recv` waits for the next delivery and returns `None` when the source
/// is closed and drained; `try_recv` never waits; `redeliver` puts a
/// delivery back with its attempt count incremented.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn recv(&self) -> Option<Delivery>;
    fn try_recv(&self) -> Option<Delivery>;
    fn redeliver(&self, delivery: Delivery);
}

#[async_trait]
impl EventSource for EventQueue {
    async fn recv(&self) -> Option<Delivery> {
        self.dequeue().await
    }

    fn try_recv(&self) -> Option<Delivery> {
        self.try_dequeue()
    }

    fn redeliver(&self, delivery: Delivery) {
        EventQueue::redeliver(self, delivery)
    }
}

/// Result of handling one delivery
#[derive(Debug, Clone, PartialEq)]
pub enum Handled {
    /// The transition (or idempotent no-op) committed
    Success(TransitionReport),
    /// A transient condition; the delivery may be retried
    TransientFailure(String),
    /// Redelivery cannot fix this; do not retry
    PermanentFailure(String),
}

/// What a successful delivery did to the claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionReport {
    pub transition: Transition,
}

/// Consumes claim events and applies status transitions
#[derive(Debug, Clone)]
pub struct TransitionWorker {
    store: ClaimStore,
    results: Arc<OutcomeStore>,
    retry: RetryPolicy,
}

impl TransitionWorker {
    /// Creates a worker with the default retry policy
    pub fn new(store: ClaimStore, results: Arc<OutcomeStore>) -> Self {
        Self {
            store,
            results,
            retry: RetryPolicy::default(),
        }
    }

    /// Overrides the retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Handles one delivery of an event.
    ///
    /// The whole read-modify-write happens under the claim's exclusive
    /// lock; concurrent workers targeting the same claim serialize here.
    pub async fn handle(&self, event: &ClaimEvent, attempt: u32) -> Handled {
        // The tenant context for this unit of work comes from the event
        // payload, not from any ambient state of the worker slot.
        let scope = TenantScope::begin(TenantContext::new(event.organization));

        let mut guard = match self.store.lock(&scope, event.claim_id).await {
            Ok(guard) => guard,
            Err(err) if err.is_not_found() => {
                return Handled::PermanentFailure(format!(
                    "claim {} not found for organization {}",
                    event.claim_id, event.organization
                ));
            }
            Err(err) if err.is_transient() => return Handled::TransientFailure(err.to_string()),
            Err(err) => return Handled::PermanentFailure(err.to_string()),
        };

        let transition = apply_clinical_event(
            guard.claim_mut(),
            event.event_type,
            event.treatment_type.as_deref(),
        );
        guard.commit().await;

        info!(
            event_id = %event.id,
            claim_id = %event.claim_id,
            attempt,
            transition = ?transition,
            "event handled"
        );
        Handled::Success(TransitionReport { transition })
        // scope drops here on every path above as well
    }

    /// Handles one delivery end-to-end: terminal outcomes are recorded,
    /// transient failures are backed off and redelivered until the retry
    /// policy is exhausted.
    pub async fn process(&self, source: &dyn EventSource, delivery: Delivery) {
        match self.handle(&delivery.event, delivery.attempt).await {
            Handled::Success(report) => {
                self.results
                    .record_success(&delivery.event, delivery.attempt, report.transition);
            }
            Handled::PermanentFailure(detail) => {
                error!(
                    event_id = %delivery.event.id,
                    attempt = delivery.attempt,
                    detail,
                    "event permanently failed"
                );
                self.results
                    .record_failure(&delivery.event, delivery.attempt, detail);
            }
            Handled::TransientFailure(detail) => {
                if self.retry.may_retry(delivery.attempt) {
                    warn!(
                        event_id = %delivery.event.id,
                        attempt = delivery.attempt,
                        detail,
                        "transient failure, scheduling redelivery"
                    );
                    tokio::time::sleep(self.retry.backoff(delivery.attempt)).await;
                    source.redeliver(delivery);
                } else {
                    error!(
                        event_id = %delivery.event.id,
                        attempts = delivery.attempt,
                        detail,
                        "retries exhausted, marking event failed"
                    );
                    self.results
                        .record_failure(&delivery.event, delivery.attempt, detail);
                }
            }
        }
    }

    /// Consumes deliveries until the source is closed and drained
    pub async fn run(&self, source: &dyn EventSource) {
        while let Some(delivery) = source.recv().await {
            self.process(source, delivery).await;
        }
    }

    /// Processes everything currently queued, including redeliveries
    /// produced along the way, then returns
    pub async fn drain(&self, source: &dyn EventSource) {
        while let Some(delivery) = source.try_recv() {
            self.process(source, delivery).await;
        }
    }
}
