//! Synchronous claim service
//!
//! The application boundary for synchronous callers. Every operation
//! begins a tenant scope derived from the caller's organization, runs the
//! permission gate before touching the gateway, and releases the scope
//! when the unit of work ends (by drop, on every exit path).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use core_kernel::{ClaimId, UserId};
use core_tenancy::{TenantContext, TenantScope};
use domain_claims::{
    authorize, Action, Claim, ClaimFilter, ClaimStatus, ClinicalEventType, NewClaim, Role, User,
};
use infra_queue::{ClaimEvent, EventQueue};
use infra_store::ClaimStore;

use crate::error::ServiceError;

/// Result of a bulk status update: how many claims changed, and what was
/// skipped and why
#[derive(Debug, Clone, Default)]
pub struct BulkUpdateOutcome {
    pub updated: usize,
    pub errors: Vec<String>,
}

/// Permission-gated, tenant-scoped operations on claims
#[derive(Debug, Clone)]
pub struct ClaimService {
    store: ClaimStore,
    queue: Arc<EventQueue>,
}

impl ClaimService {
    /// Creates a service over the given gateway and event queue
    pub fn new(store: ClaimStore, queue: Arc<EventQueue>) -> Self {
        Self { store, queue }
    }

    /// Begins a unit of work as the given caller
    fn begin_request(user: &User) -> TenantScope {
        TenantScope::begin(TenantContext::for_user(user.organization, user.id))
    }

    /// Submits a new claim for the caller's organization
    pub async fn submit_claim(&self, user: &User, details: NewClaim) -> Result<Claim, ServiceError> {
        authorize(user, Action::Create, None)?;
        let scope = Self::begin_request(user);
        let claim = self.store.create(&scope, details).await?;
        Ok(claim)
    }

    /// Retrieves a claim the caller is allowed to see
    pub async fn get_claim(&self, user: &User, claim_id: ClaimId) -> Result<Claim, ServiceError> {
        let scope = Self::begin_request(user);
        let claim = self.store.get(&scope, claim_id).await?;
        authorize(user, Action::Read, Some(&claim))?;
        Ok(claim)
    }

    /// Lists claims visible to the caller, narrowed by role:
    /// processors see their assignments, providers their submissions,
    /// patients their own claims, admins everything in the organization.
    pub async fn list_claims(
        &self,
        user: &User,
        filter: &ClaimFilter,
    ) -> Result<Vec<Claim>, ServiceError> {
        authorize(user, Action::Read, None)?;
        let scope = Self::begin_request(user);
        let claims = self.store.list(&scope, filter).await?;

        let visible = claims
            .into_iter()
            .filter(|claim| match user.role {
                Role::Admin => true,
                Role::ClaimsProcessor => claim.assigned_processor == Some(user.id),
                Role::Provider => claim.provider_id == user.id,
                Role::Patient => user.patient_id == Some(claim.patient_id),
            })
            .collect();
        Ok(visible)
    }

    /// Assigns a processor to a claim
    pub async fn assign_processor(
        &self,
        user: &User,
        claim_id: ClaimId,
        processor: UserId,
    ) -> Result<Claim, ServiceError> {
        authorize(user, Action::UpdateStatus, None)?;
        let scope = Self::begin_request(user);

        let mut guard = self.store.lock(&scope, claim_id).await?;
        authorize(user, Action::UpdateStatus, Some(guard.claim()))?;
        guard.claim_mut().assign_processor(processor);
        Ok(guard.commit().await)
    }

    /// Applies a direct status mutation under the claim's exclusive lock
    pub async fn update_status(
        &self,
        user: &User,
        claim_id: ClaimId,
        status: ClaimStatus,
        reason: Option<&str>,
    ) -> Result<Claim, ServiceError> {
        // Capability check before the gateway is touched; the object-level
        // check runs once the claim is locked and loaded.
        authorize(user, Action::UpdateStatus, None)?;
        let scope = Self::begin_request(user);

        let mut guard = self.store.lock(&scope, claim_id).await?;
        authorize(user, Action::UpdateStatus, Some(guard.claim()))?;
        guard.claim_mut().update_status(status, reason)?;
        let claim = guard.commit().await;

        info!(claim_id = %claim.id, status = ?claim.status, "claim status updated");
        Ok(claim)
    }

    /// Updates several claims to one status, skipping claims that are
    /// already approved or paid. Per-claim failures are collected, not
    /// fatal to the batch.
    pub async fn bulk_update_status(
        &self,
        user: &User,
        claim_ids: &[ClaimId],
        status: ClaimStatus,
    ) -> Result<BulkUpdateOutcome, ServiceError> {
        authorize(user, Action::UpdateStatus, None)?;
        let scope = Self::begin_request(user);

        let mut outcome = BulkUpdateOutcome::default();
        for &claim_id in claim_ids {
            let mut guard = match self.store.lock(&scope, claim_id).await {
                Ok(guard) => guard,
                Err(err) => {
                    outcome.errors.push(format!("claim {claim_id}: {err}"));
                    continue;
                }
            };
            if authorize(user, Action::UpdateStatus, Some(guard.claim())).is_err() {
                outcome
                    .errors
                    .push(format!("claim {claim_id}: permission denied"));
                continue;
            }
            let current = guard.claim().status;
            if matches!(current, ClaimStatus::Approved | ClaimStatus::Paid) {
                outcome
                    .errors
                    .push(format!("claim {claim_id} is already {current:?}"));
                continue;
            }
            match guard.claim_mut().update_status(status, None) {
                Ok(()) => {
                    guard.commit().await;
                    outcome.updated += 1;
                }
                Err(err) => outcome.errors.push(format!("claim {claim_id}: {err}")),
            }
        }
        Ok(outcome)
    }

    /// Records a clinical observation for a claim and enqueues the
    /// corresponding transition event. The event's organization id comes
    /// from the caller's tenant context, never from input.
    pub async fn record_clinical_event(
        &self,
        user: &User,
        event_type: ClinicalEventType,
        claim_id: ClaimId,
        occurred_at: DateTime<Utc>,
        treatment_type: Option<String>,
    ) -> Result<ClaimEvent, ServiceError> {
        authorize(user, Action::Create, None)?;
        let scope = Self::begin_request(user);

        // The claim must be visible to this tenant before anything is
        // published about it.
        let claim = self.store.get(&scope, claim_id).await?;

        let mut event = ClaimEvent::new(
            event_type,
            claim.id,
            scope.organization()?,
            occurred_at,
        );
        if let Some(treatment) = treatment_type {
            event = event.with_treatment_type(treatment);
        }

        self.queue.enqueue(event.clone());
        Ok(event)
    }
}
