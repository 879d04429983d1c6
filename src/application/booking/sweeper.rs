//! Background task that sweeps stale slot locks.
//!
//! Runs in a tokio::spawn loop, checking every 60 seconds for
//! locations holding a lock past its `lock_expires_at` and running a
//! reconcile pass on each so the slot moves on to the next booking.

use std::sync::Arc;

use chrono::Utc;
use tokio::time::Duration;
use tracing::{info, warn};

use crate::domain::RepositoryProvider;
use crate::shared::shutdown::ShutdownSignal;

use super::reconciler::QueueReconciler;

/// Start the queue sweeper background task.
///
/// The task checks every `check_interval_secs` (default 60) for
/// locations where the locked booking's `lock_expires_at < now()`,
/// then reconciles each of those locations.
pub fn start_queue_sweeper_task(
    repos: Arc<dyn RepositoryProvider>,
    reconciler: Arc<QueueReconciler>,
    shutdown: ShutdownSignal,
    check_interval_secs: u64,
) {
    tokio::spawn(async move {
        info!(
            check_interval = check_interval_secs,
            "🧹 Queue sweeper task started"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(check_interval_secs));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = sweep_stale_locks(&repos, &reconciler).await {
                        warn!(error = %e, "Queue sweep error");
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("🧹 Queue sweeper task shutting down");
                    break;
                }
            }
        }

        info!("🧹 Queue sweeper task stopped");
    });
}

async fn sweep_stale_locks(
    repos: &Arc<dyn RepositoryProvider>,
    reconciler: &Arc<QueueReconciler>,
) -> Result<(), Box<dyn std::error::Error>> {
    let locations = repos
        .bookings()
        .locations_with_stale_locks(Utc::now())
        .await?;

    if locations.is_empty() {
        return Ok(());
    }

    info!(count = locations.len(), "Sweeping locations with stale slot locks");

    for location_id in locations {
        if let Err(e) = reconciler.reconcile(&location_id).await {
            warn!(location_id = %location_id, error = %e, "Queue sweep failed for location");
        }
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::booking::locks::LockRegistry;
    use crate::domain::booking::{BookingStatus, NewBooking};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use chrono::Duration as ChronoDuration;

    fn new_booking(vehicle: &str, location: &str) -> NewBooking {
        NewBooking {
            user_id: "u1".to_string(),
            vehicle_id: vehicle.to_string(),
            location_id: location.to_string(),
            latitude: 41.311,
            longitude: 69.240,
            current_charge: 40,
            eta_minutes: 2.0,
        }
    }

    #[tokio::test]
    async fn sweep_demotes_stale_locks_and_promotes_the_next_booking() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let reconciler = Arc::new(QueueReconciler::new(
            repos.clone() as Arc<dyn RepositoryProvider>,
            LockRegistry::shared(),
        ));

        let mut holder = repos.bookings().insert(new_booking("v1", "loc-1")).await.unwrap();
        holder.status = BookingStatus::Locked;
        holder.lock_expires_at = Some(Utc::now() - ChronoDuration::minutes(1));
        repos.bookings().update(&holder).await.unwrap();
        let waiter = repos.bookings().insert(new_booking("v2", "loc-1")).await.unwrap();

        let generic: Arc<dyn RepositoryProvider> = repos.clone();
        sweep_stale_locks(&generic, &reconciler).await.unwrap();

        let demoted = repos.bookings().find_by_id(holder.id).await.unwrap().unwrap();
        assert_eq!(demoted.status, BookingStatus::Expired);
        let promoted = repos.bookings().find_by_id(waiter.id).await.unwrap().unwrap();
        assert_eq!(promoted.status, BookingStatus::Locked);
    }

    #[tokio::test]
    async fn sweep_leaves_live_locks_alone() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let reconciler = Arc::new(QueueReconciler::new(
            repos.clone() as Arc<dyn RepositoryProvider>,
            LockRegistry::shared(),
        ));

        let mut holder = repos.bookings().insert(new_booking("v1", "loc-1")).await.unwrap();
        holder.status = BookingStatus::Locked;
        holder.lock_expires_at = Some(Utc::now() + ChronoDuration::minutes(3));
        repos.bookings().update(&holder).await.unwrap();

        let generic: Arc<dyn RepositoryProvider> = repos.clone();
        sweep_stale_locks(&generic, &reconciler).await.unwrap();

        let untouched = repos.bookings().find_by_id(holder.id).await.unwrap().unwrap();
        assert_eq!(untouched.status, BookingStatus::Locked);
    }
}
