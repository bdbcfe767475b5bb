//! In-process event queue
//!
//! An at-least-once delivery adapter with the same boundary contract an
//! external broker would provide: `enqueue` publishes, `dequeue` hands a
//! [`Delivery`] (event plus attempt number) to exactly one consumer, and
//! `redeliver` puts a delivery back with its attempt count incremented.
//! No ordering is guaranteed across different claims.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tokio::sync::Notify;
use tracing::{debug, info};

use crate::event::{ClaimEvent, Delivery};

/// In-process claim event queue
#[derive(Debug, Default)]
pub struct EventQueue {
    inner: Mutex<VecDeque<Delivery>>,
    notify: Notify,
    closed: AtomicBool,
}

impl EventQueue {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes an event for first delivery
    pub fn enqueue(&self, event: ClaimEvent) {
        info!(
            event_id = %event.id,
            event_type = ?event.event_type,
            claim_id = %event.claim_id,
            "event enqueued"
        );
        self.push(Delivery::first(event));
    }

    /// Puts a delivery back on the queue with its attempt count incremented.
    /// Used after a transient failure.
    pub fn redeliver(&self, mut delivery: Delivery) {
        delivery.attempt += 1;
        debug!(
            event_id = %delivery.event.id,
            attempt = delivery.attempt,
            "event redelivered"
        );
        self.push(delivery);
    }

    /// Takes the next delivery without waiting
    pub fn try_dequeue(&self) -> Option<Delivery> {
        self.inner.lock().expect("queue poisoned").pop_front()
    }

    /// Waits for the next delivery. Returns `None` once the queue is
    /// closed and drained.
    pub async fn dequeue(&self) -> Option<Delivery> {
        loop {
            // Arm the notification before re-checking, so an enqueue
            // between the check and the await cannot be missed.
            let notified = self.notify.notified();
            if let Some(delivery) = self.try_dequeue() {
                return Some(delivery);
            }
            if self.closed.load(Ordering::Acquire) {
                return None;
            }
            notified.await;
        }
    }

    /// Closes the queue; pending deliveries are still drained
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.notify.notify_waiters();
    }

    /// Number of deliveries currently waiting
    pub fn len(&self) -> usize {
        self.inner.lock().expect("queue poisoned").len()
    }

    /// True if nothing is waiting for delivery
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, delivery: Delivery) {
        self.inner
            .lock()
            .expect("queue poisoned")
            .push_back(delivery);
        self.notify.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_kernel::{ClaimId, OrgId};
    use domain_claims::ClinicalEventType;

    fn event() -> ClaimEvent {
        ClaimEvent::new(
            ClinicalEventType::PatientAdmission,
            ClaimId::new(),
            OrgId::new(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_first_delivery_has_attempt_one() {
        let queue = EventQueue::new();
        queue.enqueue(event());

        let delivery = queue.try_dequeue().unwrap();
        assert_eq!(delivery.attempt, 1);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_redeliver_increments_attempt() {
        let queue = EventQueue::new();
        queue.enqueue(event());

        let delivery = queue.try_dequeue().unwrap();
        queue.redeliver(delivery);
        let delivery = queue.try_dequeue().unwrap();
        assert_eq!(delivery.attempt, 2);
    }

    #[tokio::test]
    async fn test_dequeue_waits_for_enqueue() {
        let queue = std::sync::Arc::new(EventQueue::new());

        let consumer = {
            let queue = queue.clone();
            tokio::spawn(async move { queue.dequeue().await })
        };

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let published = event();
        queue.enqueue(published.clone());

        let delivered = consumer.await.unwrap().unwrap();
        assert_eq!(delivered.event.id, published.id);
    }

    #[tokio::test]
    async fn test_close_drains_then_ends() {
        let queue = EventQueue::new();
        queue.enqueue(event());
        queue.close();

        assert!(queue.dequeue().await.is_some());
        assert!(queue.dequeue().await.is_none());
    }
}
