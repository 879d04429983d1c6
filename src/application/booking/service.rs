//! Pre-booking application service
//!
//! Owns the admission pipeline and the queue read models. Writes for
//! a location run inside that location's critical section, and
//! admission also holds the vehicle's section so a double submit for
//! one vehicle cannot produce two active bookings. Both paths take
//! the vehicle section before the location section, so they cannot
//! deadlock each other.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::booking::{Booking, BookingStatus, NewBooking, MAX_QUEUE_CAPACITY};
use crate::domain::vehicle::Vehicle;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::errors::AdmissionRejection;

use super::eta::{self, EtaEstimate};
use super::locks::{LockRegistry, SharedLockRegistry};
use super::priority::{rank_pending, ScoredBooking};
use super::reconciler::QueueReconciler;

/// Admission request, validated at the HTTP edge
#[derive(Debug, Clone)]
pub struct AdmissionRequest {
    pub vehicle_id: String,
    pub location_id: String,
    pub location_latitude: f64,
    pub location_longitude: f64,
    pub current_charge: i32,
}

/// A successfully admitted booking with its travel estimate
#[derive(Debug, Clone)]
pub struct AdmittedBooking {
    pub booking: Booking,
    pub estimate: EtaEstimate,
}

/// Capacity gate result
#[derive(Debug, Clone, Copy)]
pub struct AdmissionCheck {
    pub can_admit: bool,
    pub current_count: u64,
    pub max_capacity: u64,
}

/// Queue load band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueLoad {
    Low,
    Medium,
    High,
    Full,
}

impl QueueLoad {
    pub fn for_count(count: u64) -> Self {
        if count >= MAX_QUEUE_CAPACITY {
            Self::Full
        } else if count >= 4 {
            Self::High
        } else if count >= 2 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Full => "FULL",
        }
    }
}

/// Estimated wait derived from pending ETAs, zeros when nothing is
/// pending
#[derive(Debug, Clone, Copy)]
pub struct EstimatedWait {
    pub average_minutes: i64,
    pub maximum_minutes: i64,
}

/// Queue status summary for a location
#[derive(Debug, Clone, Copy)]
pub struct QueueStatus {
    pub is_full: bool,
    pub current_count: u64,
    pub max_capacity: u64,
    pub remaining_slots: u64,
    pub utilization_percentage: u32,
    pub load: QueueLoad,
    pub estimated_wait: EstimatedWait,
}

/// Ranked pending queue with its status summary
#[derive(Debug, Clone)]
pub struct QueueView {
    pub entries: Vec<ScoredBooking>,
    pub status: QueueStatus,
}

/// Vehicles a user could book a slot for at a location
#[derive(Debug, Clone)]
pub struct AvailableVehicles {
    pub vehicles: Vec<Vehicle>,
    pub status: QueueStatus,
}

/// Application service for the pre-booking queue
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    reconciler: Arc<QueueReconciler>,
    location_locks: SharedLockRegistry,
    vehicle_locks: SharedLockRegistry,
}

impl BookingService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        reconciler: Arc<QueueReconciler>,
        location_locks: SharedLockRegistry,
    ) -> Self {
        Self {
            repos,
            reconciler,
            location_locks,
            vehicle_locks: LockRegistry::shared(),
        }
    }

    /// Admit a new pre-booking.
    ///
    /// Checks run in order: vehicle exists and is the caller's, vehicle
    /// is electric, vehicle is not already queued, location has a free
    /// slot, vehicle can arrive within the admission window. The queue
    /// is reconciled before this returns, so the caller sees the
    /// booking's settled status.
    pub async fn create_booking(
        &self,
        user_id: &str,
        request: AdmissionRequest,
    ) -> DomainResult<AdmittedBooking> {
        let AdmissionRequest {
            vehicle_id,
            location_id,
            location_latitude,
            location_longitude,
            current_charge,
        } = request;

        if !(0..=100).contains(&current_charge) {
            return Err(DomainError::Validation(format!(
                "current_charge must be between 0 and 100, got {}",
                current_charge
            )));
        }

        let _vehicle_guard = self.vehicle_locks.acquire(&vehicle_id).await;

        let vehicle = self
            .repos
            .vehicles()
            .find_by_id_for_user(&vehicle_id, user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: vehicle_id.clone(),
            })?;

        if !vehicle.is_electric() {
            metrics::counter!("prebook_admissions_total", "outcome" => "not_electric")
                .increment(1);
            return Err(DomainError::Validation(format!(
                "vehicle {} runs on {}, only electric vehicles can pre-book",
                vehicle.id, vehicle.fuel_type
            )));
        }

        if self
            .repos
            .bookings()
            .find_active_for_vehicle(user_id, &vehicle_id)
            .await?
            .is_some()
        {
            metrics::counter!("prebook_admissions_total", "outcome" => "vehicle_already_queued")
                .increment(1);
            return Err(DomainError::AdmissionRejected(
                AdmissionRejection::VehicleAlreadyQueued {
                    vehicle_id: vehicle_id.clone(),
                },
            ));
        }

        let _location_guard = self.location_locks.acquire(&location_id).await;

        let current_count = self
            .repos
            .bookings()
            .count_active_for_location(&location_id)
            .await?;
        if current_count >= MAX_QUEUE_CAPACITY {
            metrics::counter!("prebook_admissions_total", "outcome" => "capacity_full")
                .increment(1);
            return Err(DomainError::AdmissionRejected(
                AdmissionRejection::CapacityFull {
                    current_count,
                    max_capacity: MAX_QUEUE_CAPACITY,
                },
            ));
        }

        let estimate = eta::estimate(
            vehicle.latitude,
            vehicle.longitude,
            location_latitude,
            location_longitude,
        );
        if !estimate.is_within_window() {
            metrics::counter!("prebook_admissions_total", "outcome" => "eta_too_long")
                .increment(1);
            return Err(DomainError::AdmissionRejected(
                AdmissionRejection::EtaTooLong {
                    eta_minutes: estimate.eta_minutes,
                    distance_km: estimate.distance_km,
                },
            ));
        }

        let booking = self
            .repos
            .bookings()
            .insert(NewBooking {
                user_id: user_id.to_string(),
                vehicle_id,
                location_id: location_id.clone(),
                latitude: location_latitude,
                longitude: location_longitude,
                current_charge,
                eta_minutes: estimate.eta_minutes,
            })
            .await?;

        // The caller only hears back once the queue has settled
        self.reconciler.reconcile_locked(&location_id).await?;

        metrics::counter!("prebook_admissions_total", "outcome" => "admitted").increment(1);
        info!(
            booking_id = booking.id,
            location_id = %location_id,
            eta_minutes = estimate.eta_minutes,
            distance_km = estimate.distance_km,
            "Pre-booking admitted"
        );

        // The reconcile pass may have granted this booking the slot
        let booking = self
            .repos
            .bookings()
            .find_by_id(booking.id)
            .await?
            .unwrap_or(booking);

        Ok(AdmittedBooking { booking, estimate })
    }

    /// Confirm the driver arrived while holding the slot lock.
    ///
    /// A missing booking and someone else's booking are
    /// indistinguishable to the caller.
    pub async fn mark_arrived(&self, user_id: &str, booking_id: i32) -> DomainResult<Booking> {
        let found = self
            .repos
            .bookings()
            .find_by_id_for_user(booking_id, user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: booking_id.to_string(),
            })?;

        let location_id = found.location_id.clone();
        let _guard = self.location_locks.acquire(&location_id).await;

        // Re-read under the section; the sweeper may have demoted the
        // lock in the meantime
        let mut booking = self
            .repos
            .bookings()
            .find_by_id_for_user(booking_id, user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: booking_id.to_string(),
            })?;

        if booking.status != BookingStatus::Locked {
            return Err(DomainError::Validation(format!(
                "booking {} is {}, only a locked booking can be marked arrived",
                booking.id, booking.status
            )));
        }

        booking.mark_arrived();
        self.repos.bookings().update(&booking).await?;

        metrics::counter!("prebook_arrivals_total").increment(1);
        info!(booking_id, location_id = %location_id, "Driver arrived, slot released");

        self.reconciler.reconcile_locked(&location_id).await?;

        Ok(booking)
    }

    /// The caller's bookings, newest first
    pub async fn my_bookings(&self, user_id: &str) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_for_user(user_id).await
    }

    /// One booking, scoped to its owner
    pub async fn get_booking(&self, user_id: &str, booking_id: i32) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id_for_user(booking_id, user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: booking_id.to_string(),
            })
    }

    /// Ranked pending queue for a location with its status summary
    pub async fn location_queue(&self, location_id: &str) -> DomainResult<QueueView> {
        let now = Utc::now();
        let pending = self
            .repos
            .bookings()
            .find_pending_for_location(location_id)
            .await?;
        let current_count = self
            .repos
            .bookings()
            .count_active_for_location(location_id)
            .await?;

        let status = Self::build_status(current_count, &pending);
        let entries = rank_pending(pending, now);
        Ok(QueueView { entries, status })
    }

    /// Full booking history for a location
    pub async fn location_history(&self, location_id: &str) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_all_for_location(location_id).await
    }

    /// Queue status summary for a location
    pub async fn queue_status(&self, location_id: &str) -> DomainResult<QueueStatus> {
        let current_count = self
            .repos
            .bookings()
            .count_active_for_location(location_id)
            .await?;
        let pending = self
            .repos
            .bookings()
            .find_pending_for_location(location_id)
            .await?;
        Ok(Self::build_status(current_count, &pending))
    }

    /// Read-only capacity gate
    pub async fn can_admit(&self, location_id: &str) -> DomainResult<AdmissionCheck> {
        let current_count = self
            .repos
            .bookings()
            .count_active_for_location(location_id)
            .await?;
        Ok(AdmissionCheck {
            can_admit: current_count < MAX_QUEUE_CAPACITY,
            current_count,
            max_capacity: MAX_QUEUE_CAPACITY,
        })
    }

    /// The caller's electric vehicles that could still book a slot at
    /// the location. Empty when the location is full.
    pub async fn available_vehicles(
        &self,
        user_id: &str,
        location_id: &str,
    ) -> DomainResult<AvailableVehicles> {
        let status = self.queue_status(location_id).await?;
        if status.is_full {
            return Ok(AvailableVehicles {
                vehicles: Vec::new(),
                status,
            });
        }

        let electric = self.repos.vehicles().find_electric_for_user(user_id).await?;
        let queued = self
            .repos
            .bookings()
            .active_vehicle_ids_for_user(user_id)
            .await?;
        let vehicles = electric
            .into_iter()
            .filter(|v| !queued.contains(&v.id))
            .collect();

        Ok(AvailableVehicles { vehicles, status })
    }

    fn build_status(current_count: u64, pending: &[Booking]) -> QueueStatus {
        let estimated_wait = if pending.is_empty() {
            EstimatedWait {
                average_minutes: 0,
                maximum_minutes: 0,
            }
        } else {
            let sum: f64 = pending.iter().map(|b| b.eta_minutes).sum();
            let average = sum / pending.len() as f64;
            let maximum = pending.iter().map(|b| b.eta_minutes).fold(0.0, f64::max);
            EstimatedWait {
                average_minutes: average.round() as i64,
                maximum_minutes: maximum.round() as i64,
            }
        };

        QueueStatus {
            is_full: current_count >= MAX_QUEUE_CAPACITY,
            current_count,
            max_capacity: MAX_QUEUE_CAPACITY,
            remaining_slots: MAX_QUEUE_CAPACITY.saturating_sub(current_count),
            utilization_percentage: ((current_count as f64 / MAX_QUEUE_CAPACITY as f64) * 100.0)
                .round() as u32,
            load: QueueLoad::for_count(current_count),
            estimated_wait,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::FuelType;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    // Central Tashkent, ~600 m from LOCATION; well inside the window
    const NEAR: (f64, f64) = (41.311, 69.240);
    // Chirchiq, ~30 km out; far outside the window
    const FAR: (f64, f64) = (41.469, 69.582);
    const LOCATION: (f64, f64) = (41.316, 69.243);

    struct Fixture {
        repos: Arc<InMemoryRepositoryProvider>,
        service: BookingService,
    }

    fn setup() -> Fixture {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let location_locks = LockRegistry::shared();
        let reconciler = Arc::new(QueueReconciler::new(
            repos.clone() as Arc<dyn RepositoryProvider>,
            location_locks.clone(),
        ));
        let service = BookingService::new(repos.clone(), reconciler, location_locks);
        Fixture { repos, service }
    }

    async fn seed_vehicle(
        fixture: &Fixture,
        id: &str,
        user: &str,
        fuel_type: FuelType,
        position: (f64, f64),
    ) {
        let vehicle = Vehicle::new(
            id,
            user,
            format!("01A{}", id),
            "Nexia EV",
            fuel_type,
            position.0,
            position.1,
            12.5,
        );
        fixture.repos.vehicles().save(vehicle).await.unwrap();
    }

    fn admission(vehicle_id: &str, charge: i32) -> AdmissionRequest {
        AdmissionRequest {
            vehicle_id: vehicle_id.to_string(),
            location_id: "loc-1".to_string(),
            location_latitude: LOCATION.0,
            location_longitude: LOCATION.1,
            current_charge: charge,
        }
    }

    #[tokio::test]
    async fn sole_booking_is_admitted_and_locked() {
        let f = setup();
        seed_vehicle(&f, "v1", "u1", FuelType::Electric, NEAR).await;

        let admitted = f.service.create_booking("u1", admission("v1", 40)).await.unwrap();
        assert_eq!(admitted.booking.status, BookingStatus::Locked);
        assert!(admitted.booking.lock_expires_at.is_some());
        assert!(admitted.estimate.eta_minutes <= eta::MAX_ETA_MINUTES);
        assert!(admitted.estimate.distance_km < 1.0);
    }

    #[tokio::test]
    async fn unknown_vehicle_is_not_found() {
        let f = setup();
        let err = f.service.create_booking("u1", admission("ghost", 40)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Vehicle", .. }));
    }

    #[tokio::test]
    async fn someone_elses_vehicle_is_not_found() {
        let f = setup();
        seed_vehicle(&f, "v1", "u2", FuelType::Electric, NEAR).await;

        let err = f.service.create_booking("u1", admission("v1", 40)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Vehicle", .. }));
    }

    #[tokio::test]
    async fn petrol_vehicle_is_rejected() {
        let f = setup();
        seed_vehicle(&f, "v1", "u1", FuelType::Petrol, NEAR).await;

        let err = f.service.create_booking("u1", admission("v1", 40)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn double_booking_a_vehicle_is_rejected() {
        let f = setup();
        seed_vehicle(&f, "v1", "u1", FuelType::Electric, NEAR).await;

        f.service.create_booking("u1", admission("v1", 40)).await.unwrap();
        let err = f.service.create_booking("u1", admission("v1", 40)).await.unwrap_err();

        match err {
            DomainError::AdmissionRejected(rejection) => {
                assert_eq!(rejection.reason(), "vehicle_already_queued");
            }
            other => panic!("expected admission rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn sixth_booking_hits_capacity() {
        let f = setup();
        for i in 1..=6 {
            seed_vehicle(&f, &format!("v{}", i), &format!("u{}", i), FuelType::Electric, NEAR)
                .await;
        }

        for i in 1..=5 {
            f.service
                .create_booking(&format!("u{}", i), admission(&format!("v{}", i), 40))
                .await
                .unwrap();
        }

        let err = f.service.create_booking("u6", admission("v6", 40)).await.unwrap_err();
        match err {
            DomainError::AdmissionRejected(AdmissionRejection::CapacityFull {
                current_count,
                max_capacity,
            }) => {
                assert_eq!(current_count, 5);
                assert_eq!(max_capacity, 5);
            }
            other => panic!("expected capacity rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn distant_vehicle_is_rejected_with_estimate() {
        let f = setup();
        seed_vehicle(&f, "v1", "u1", FuelType::Electric, FAR).await;

        let err = f.service.create_booking("u1", admission("v1", 40)).await.unwrap_err();
        match err {
            DomainError::AdmissionRejected(AdmissionRejection::EtaTooLong {
                eta_minutes,
                distance_km,
            }) => {
                assert!(eta_minutes > eta::MAX_ETA_MINUTES);
                assert!(distance_km > 2.0);
            }
            other => panic!("expected ETA rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn charge_out_of_range_is_rejected() {
        let f = setup();
        seed_vehicle(&f, "v1", "u1", FuelType::Electric, NEAR).await;

        let err = f.service.create_booking("u1", admission("v1", 101)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn arrival_releases_the_slot_to_the_next_booking() {
        let f = setup();
        seed_vehicle(&f, "v1", "u1", FuelType::Electric, NEAR).await;
        seed_vehicle(&f, "v2", "u2", FuelType::Electric, NEAR).await;

        let first = f.service.create_booking("u1", admission("v1", 40)).await.unwrap();
        let second = f.service.create_booking("u2", admission("v2", 40)).await.unwrap();
        assert_eq!(first.booking.status, BookingStatus::Locked);
        assert_eq!(second.booking.status, BookingStatus::Pending);

        let arrived = f.service.mark_arrived("u1", first.booking.id).await.unwrap();
        assert_eq!(arrived.status, BookingStatus::Arrived);
        assert!(arrived.lock_expires_at.is_none());

        let promoted = f
            .repos
            .bookings()
            .find_by_id(second.booking.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(promoted.status, BookingStatus::Locked);
    }

    #[tokio::test]
    async fn only_a_locked_booking_can_arrive() {
        let f = setup();
        seed_vehicle(&f, "v1", "u1", FuelType::Electric, NEAR).await;
        seed_vehicle(&f, "v2", "u2", FuelType::Electric, NEAR).await;

        f.service.create_booking("u1", admission("v1", 40)).await.unwrap();
        let pending = f.service.create_booking("u2", admission("v2", 40)).await.unwrap();

        let err = f.service.mark_arrived("u2", pending.booking.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn wrong_user_and_missing_id_look_the_same() {
        let f = setup();
        seed_vehicle(&f, "v1", "u1", FuelType::Electric, NEAR).await;
        let admitted = f.service.create_booking("u1", admission("v1", 40)).await.unwrap();

        let wrong_user = f.service.mark_arrived("u2", admitted.booking.id).await.unwrap_err();
        let missing = f.service.mark_arrived("u1", 9999).await.unwrap_err();

        assert!(matches!(wrong_user, DomainError::NotFound { entity: "Booking", .. }));
        assert!(matches!(missing, DomainError::NotFound { entity: "Booking", .. }));
    }

    #[tokio::test]
    async fn queue_view_ranks_pending_bookings() {
        let f = setup();
        seed_vehicle(&f, "v1", "u1", FuelType::Electric, NEAR).await;
        seed_vehicle(&f, "v2", "u2", FuelType::Electric, NEAR).await;
        seed_vehicle(&f, "v3", "u3", FuelType::Electric, NEAR).await;

        // First booking takes the lock; the other two stay pending
        f.service.create_booking("u1", admission("v1", 90)).await.unwrap();
        let comfortable = f.service.create_booking("u2", admission("v2", 90)).await.unwrap();
        let urgent = f.service.create_booking("u3", admission("v3", 8)).await.unwrap();

        let view = f.service.location_queue("loc-1").await.unwrap();
        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.entries[0].booking.id, urgent.booking.id);
        assert_eq!(view.entries[1].booking.id, comfortable.booking.id);
        assert!(view.entries[0].score > view.entries[1].score);
        assert_eq!(view.status.current_count, 3);
    }

    #[tokio::test]
    async fn queue_status_bands_follow_the_count() {
        let f = setup();

        let empty = f.service.queue_status("loc-1").await.unwrap();
        assert_eq!(empty.load, QueueLoad::Low);
        assert_eq!(empty.current_count, 0);
        assert_eq!(empty.remaining_slots, 5);
        assert_eq!(empty.utilization_percentage, 0);
        assert_eq!(empty.estimated_wait.average_minutes, 0);

        for i in 1..=5 {
            seed_vehicle(&f, &format!("v{}", i), &format!("u{}", i), FuelType::Electric, NEAR)
                .await;
            f.service
                .create_booking(&format!("u{}", i), admission(&format!("v{}", i), 40))
                .await
                .unwrap();

            let status = f.service.queue_status("loc-1").await.unwrap();
            assert_eq!(status.current_count, i as u64);
            let expected = match i {
                1 => QueueLoad::Low,
                2 | 3 => QueueLoad::Medium,
                4 => QueueLoad::High,
                _ => QueueLoad::Full,
            };
            assert_eq!(status.load, expected);
        }

        let full = f.service.queue_status("loc-1").await.unwrap();
        assert!(full.is_full);
        assert_eq!(full.remaining_slots, 0);
        assert_eq!(full.utilization_percentage, 100);
        // Four pending bookings share the same ETA
        assert_eq!(
            full.estimated_wait.average_minutes,
            full.estimated_wait.maximum_minutes
        );

        let check = f.service.can_admit("loc-1").await.unwrap();
        assert!(!check.can_admit);
        assert_eq!(check.current_count, 5);
    }

    #[tokio::test]
    async fn capacity_gate_admits_below_capacity() {
        let f = setup();
        seed_vehicle(&f, "v1", "u1", FuelType::Electric, NEAR).await;
        f.service.create_booking("u1", admission("v1", 40)).await.unwrap();

        let check = f.service.can_admit("loc-1").await.unwrap();
        assert!(check.can_admit);
        assert_eq!(check.current_count, 1);
        assert_eq!(check.max_capacity, 5);
    }

    #[tokio::test]
    async fn available_vehicles_skips_queued_and_non_electric() {
        let f = setup();
        seed_vehicle(&f, "v1", "u1", FuelType::Electric, NEAR).await;
        seed_vehicle(&f, "v2", "u1", FuelType::Electric, NEAR).await;
        seed_vehicle(&f, "v3", "u1", FuelType::Petrol, NEAR).await;

        f.service.create_booking("u1", admission("v1", 40)).await.unwrap();

        let available = f.service.available_vehicles("u1", "loc-1").await.unwrap();
        let ids: Vec<&str> = available.vehicles.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v2"]);
    }

    #[tokio::test]
    async fn full_location_offers_no_vehicles() {
        let f = setup();
        for i in 1..=5 {
            seed_vehicle(&f, &format!("v{}", i), &format!("u{}", i), FuelType::Electric, NEAR)
                .await;
            f.service
                .create_booking(&format!("u{}", i), admission(&format!("v{}", i), 40))
                .await
                .unwrap();
        }
        seed_vehicle(&f, "v9", "u9", FuelType::Electric, NEAR).await;

        let available = f.service.available_vehicles("u9", "loc-1").await.unwrap();
        assert!(available.vehicles.is_empty());
        assert!(available.status.is_full);
    }

    #[tokio::test]
    async fn concurrent_creates_for_one_vehicle_admit_once() {
        let f = setup();
        seed_vehicle(&f, "v1", "u1", FuelType::Electric, NEAR).await;

        let service = Arc::new(f.service);
        let (a, b) = tokio::join!(
            {
                let s = service.clone();
                async move { s.create_booking("u1", admission("v1", 40)).await }
            },
            {
                let s = service.clone();
                async move { s.create_booking("u1", admission("v1", 40)).await }
            }
        );

        let admitted = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(admitted, 1);

        let rejected = [a, b].into_iter().find(|r| r.is_err()).unwrap().unwrap_err();
        match rejected {
            DomainError::AdmissionRejected(rejection) => {
                assert_eq!(rejection.reason(), "vehicle_already_queued");
            }
            other => panic!("expected admission rejection, got {:?}", other),
        }

        let active = f
            .repos
            .bookings()
            .find_active_for_vehicle("u1", "v1")
            .await
            .unwrap();
        assert!(active.is_some());
    }
}
