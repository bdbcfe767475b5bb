//! Tenant-scoped claim store
//!
//! An in-process storage engine with the same contract a row-locking SQL
//! deployment would honor: every operation is filtered by the scope's
//! organization, and per-claim mutations are serialized by an exclusive
//! lock with a bounded acquisition wait.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tokio::time::timeout;
use tracing::{info, warn};

use core_kernel::ClaimId;
use core_tenancy::TenantScope;
use domain_claims::{Claim, ClaimFilter, NewClaim};

use crate::error::StoreError;

/// Configuration options for the claim store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Bounded wait for acquiring a claim's exclusive lock
    pub lock_wait: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            lock_wait: Duration::from_secs(5),
        }
    }
}

type ClaimRows = Arc<RwLock<HashMap<ClaimId, Claim>>>;

/// The tenant-scoped data gateway for claims.
///
/// Each operation takes the caller's [`TenantScope`] and implicitly filters
/// on the active organization. A `get` for a claim owned by a different
/// organization behaves identically to a missing claim.
#[derive(Debug, Clone, Default)]
pub struct ClaimStore {
    rows: ClaimRows,
    locks: Arc<StdMutex<HashMap<ClaimId, Arc<Mutex<()>>>>>,
    config: StoreConfig,
}

impl ClaimStore {
    /// Creates a store with default configuration
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates a store with the given configuration
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
            locks: Arc::new(StdMutex::new(HashMap::new())),
            config,
        }
    }

    /// Creates a claim owned by the scope's organization.
    ///
    /// A caller-supplied organization id that differs from the active
    /// context is rejected with `TenantMismatch` and nothing is persisted;
    /// the owning organization is always derived from the context, never
    /// taken from untrusted input.
    pub async fn create(
        &self,
        scope: &TenantScope,
        details: NewClaim,
    ) -> Result<Claim, StoreError> {
        if let Some(provided) = details.organization {
            if let Err(err) = scope.verify_ownership(provided) {
                warn!(%provided, "rejected claim create asserting foreign organization");
                return Err(err.into());
            }
        }
        let organization = scope.organization()?;

        let claim = Claim::submit(organization, details)?;
        self.rows.write().await.insert(claim.id, claim.clone());

        info!(claim_id = %claim.id, organization = %organization, "claim created");
        Ok(claim)
    }

    /// Retrieves a claim by id within the active tenant
    pub async fn get(&self, scope: &TenantScope, id: ClaimId) -> Result<Claim, StoreError> {
        let organization = scope.organization()?;
        self.rows
            .read()
            .await
            .get(&id)
            .filter(|claim| claim.organization == organization)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Claim", id))
    }

    /// Lists the active tenant's claims matching the filter, newest first
    pub async fn list(
        &self,
        scope: &TenantScope,
        filter: &ClaimFilter,
    ) -> Result<Vec<Claim>, StoreError> {
        let organization = scope.organization()?;
        let rows = self.rows.read().await;
        let mut claims: Vec<Claim> = rows
            .values()
            .filter(|claim| claim.organization == organization)
            .filter(|claim| filter.matches(claim))
            .cloned()
            .collect();
        claims.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(claims)
    }

    /// Writes back a claim within the active tenant.
    ///
    /// The stored row must exist and belong to the scope's organization,
    /// and ownership can never be reassigned. Callers that mutate status
    /// should prefer [`ClaimStore::lock`] + [`ClaimGuard::commit`] so the
    /// read-modify-write is serialized.
    pub async fn update(&self, scope: &TenantScope, claim: Claim) -> Result<Claim, StoreError> {
        let organization = scope.organization()?;
        if claim.organization != organization {
            // Writing a foreign-owned claim reveals nothing either.
            return Err(StoreError::not_found("Claim", claim.id));
        }

        let mut rows = self.rows.write().await;
        match rows.get(&claim.id) {
            Some(existing) if existing.organization == organization => {
                rows.insert(claim.id, claim.clone());
                Ok(claim)
            }
            _ => Err(StoreError::not_found("Claim", claim.id)),
        }
    }

    /// Acquires the exclusive lock on a claim and returns a guard holding a
    /// fresh snapshot.
    ///
    /// Lock acquisition is itself tenant-scoped: a cross-tenant caller gets
    /// `NotFound` before any lock is touched, so it can never contend on
    /// another organization's claim. If the lock is not acquired within the
    /// configured bounded wait, the call fails with `LockTimeout`, which is
    /// transient and safe to retry.
    pub async fn lock(&self, scope: &TenantScope, id: ClaimId) -> Result<ClaimGuard, StoreError> {
        // Visibility check before lock acquisition.
        self.get(scope, id).await?;

        let handle = {
            let mut locks = self.locks.lock().expect("lock registry poisoned");
            Arc::clone(locks.entry(id).or_default())
        };

        let permit = timeout(self.config.lock_wait, handle.lock_owned())
            .await
            .map_err(|_| {
                warn!(claim_id = %id, "claim lock acquisition timed out");
                StoreError::LockTimeout {
                    claim_id: id,
                    waited_ms: self.config.lock_wait.as_millis() as u64,
                }
            })?;

        // Re-read under the lock: the previous holder may have committed
        // while we waited.
        let claim = self.get(scope, id).await?;

        Ok(ClaimGuard {
            claim,
            rows: Arc::clone(&self.rows),
            _permit: permit,
        })
    }
}

/// Exclusive access to one claim for the duration of a transition.
///
/// The guard holds the claim's lock and a snapshot of the row. Mutations
/// happen on the snapshot and become visible only on [`ClaimGuard::commit`];
/// dropping the guard without committing rolls the unit of work back, so a
/// worker that dies mid-transition leaves no partial state behind.
#[derive(Debug)]
pub struct ClaimGuard {
    claim: Claim,
    rows: ClaimRows,
    _permit: OwnedMutexGuard<()>,
}

impl ClaimGuard {
    /// The locked claim snapshot
    pub fn claim(&self) -> &Claim {
        &self.claim
    }

    /// Mutable access to the snapshot; nothing is visible until commit
    pub fn claim_mut(&mut self) -> &mut Claim {
        &mut self.claim
    }

    /// Persists the snapshot and releases the lock
    pub async fn commit(self) -> Claim {
        self.rows.write().await.insert(self.claim.id, self.claim.clone());
        self.claim
    }
}
