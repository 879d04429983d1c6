//! Queue reconciliation
//!
//! One pass per location: demote stale slot locks, and if no live
//! lock remains, grant the slot to the highest-priority pending
//! booking. Every pass runs inside the location's critical section,
//! so concurrent admissions, arrivals, and sweeps cannot interleave
//! their queue decisions.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::domain::{DomainResult, RepositoryProvider};

use super::locks::SharedLockRegistry;
use super::priority::rank_pending;

/// Outcome of one reconcile pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Nothing pending at the location
    QueueEmpty,
    /// A booking still holds a live slot lock
    LockHeld { booking_id: i32 },
    /// The top-ranked pending booking was granted the slot
    Promoted { booking_id: i32, score: i64 },
}

/// Reconciles one location's queue at a time
pub struct QueueReconciler {
    repos: Arc<dyn RepositoryProvider>,
    location_locks: SharedLockRegistry,
}

impl QueueReconciler {
    pub fn new(repos: Arc<dyn RepositoryProvider>, location_locks: SharedLockRegistry) -> Self {
        Self {
            repos,
            location_locks,
        }
    }

    /// Run one reconcile pass, taking the location's critical section.
    pub async fn reconcile(&self, location_id: &str) -> DomainResult<ReconcileOutcome> {
        let _guard = self.location_locks.acquire(location_id).await;
        self.reconcile_locked(location_id).await
    }

    /// Reconcile body. The caller must already hold the location's
    /// critical section.
    pub(crate) async fn reconcile_locked(
        &self,
        location_id: &str,
    ) -> DomainResult<ReconcileOutcome> {
        let now = Utc::now();

        let pending = self
            .repos
            .bookings()
            .find_pending_for_location(location_id)
            .await?;
        if pending.is_empty() {
            debug!(location_id, "No pending bookings, nothing to reconcile");
            return Ok(ReconcileOutcome::QueueEmpty);
        }

        let demoted = self
            .repos
            .bookings()
            .expire_stale_locks(location_id, now)
            .await?;
        if demoted > 0 {
            metrics::counter!("prebook_lock_expiries_total").increment(demoted);
            info!(location_id, count = demoted, "Demoted stale slot locks");
        }

        if let Some(holder) = self
            .repos
            .bookings()
            .find_live_lock_for_location(location_id, now)
            .await?
        {
            debug!(
                location_id,
                booking_id = holder.id,
                "Slot lock still held, queue unchanged"
            );
            return Ok(ReconcileOutcome::LockHeld {
                booking_id: holder.id,
            });
        }

        let ranked = rank_pending(pending, now);
        let Some(top) = ranked.first() else {
            return Ok(ReconcileOutcome::QueueEmpty);
        };

        let mut winner = top.booking.clone();
        winner.promote(now);
        self.repos.bookings().update(&winner).await?;

        metrics::counter!("prebook_promotions_total").increment(1);
        info!(
            location_id,
            booking_id = winner.id,
            score = top.score,
            "Granted slot lock to top-ranked booking"
        );

        Ok(ReconcileOutcome::Promoted {
            booking_id: winner.id,
            score: top.score,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
