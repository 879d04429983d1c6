//! In-memory storage implementation
//!
//! Backs the repository traits with DashMaps. Used by tests and
//! useful for running the service without a database.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::booking::{Booking, BookingRepository, BookingStatus, NewBooking};
use crate::domain::repositories::{DomainResult, RepositoryProvider};
use crate::domain::vehicle::{Vehicle, VehicleRepository};
use crate::domain::DomainError;

/// In-memory booking repository
pub struct InMemoryBookingRepository {
    bookings: DashMap<i32, Booking>,
    id_counter: AtomicI32,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self {
            bookings: DashMap::new(),
            id_counter: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: NewBooking) -> DomainResult<Booking> {
        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        let booking = Booking {
            id,
            user_id: booking.user_id,
            vehicle_id: booking.vehicle_id,
            location_id: booking.location_id,
            latitude: booking.latitude,
            longitude: booking.longitude,
            current_charge: booking.current_charge,
            eta_minutes: booking.eta_minutes,
            status: BookingStatus::Pending,
            lock_expires_at: None,
            created_at: Utc::now(),
        };
        self.bookings.insert(id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(&id).map(|b| b.clone()))
    }

    async fn find_by_id_for_user(
        &self,
        id: i32,
        user_id: &str,
    ) -> DomainResult<Option<Booking>> {
        Ok(self
            .bookings
            .get(&id)
            .filter(|b| b.user_id == user_id)
            .map(|b| b.clone()))
    }

    async fn update(&self, booking: &Booking) -> DomainResult<()> {
        if !self.bookings.contains_key(&booking.id) {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: booking.id.to_string(),
            });
        }
        self.bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn find_pending_for_location(&self, location_id: &str) -> DomainResult<Vec<Booking>> {
        let mut pending: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.location_id == location_id && b.status == BookingStatus::Pending)
            .map(|b| b.clone())
            .collect();
        pending.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(pending)
    }

    async fn find_all_for_location(&self, location_id: &str) -> DomainResult<Vec<Booking>> {
        let mut all: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.location_id == location_id)
            .map(|b| b.clone())
            .collect();
        all.sort_by(|a, b| {
            a.eta_minutes
                .partial_cmp(&b.eta_minutes)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(all)
    }

    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<Booking>> {
        let mut mine: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .map(|b| b.clone())
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine)
    }

    async fn count_active_for_location(&self, location_id: &str) -> DomainResult<u64> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.location_id == location_id && b.is_active())
            .count() as u64)
    }

    async fn find_active_for_vehicle(
        &self,
        user_id: &str,
        vehicle_id: &str,
    ) -> DomainResult<Option<Booking>> {
        Ok(self
            .bookings
            .iter()
            .find(|b| b.user_id == user_id && b.vehicle_id == vehicle_id && b.is_active())
            .map(|b| b.clone()))
    }

    async fn active_vehicle_ids_for_user(&self, user_id: &str) -> DomainResult<Vec<String>> {
        let mut ids: Vec<String> = self
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id && b.is_active())
            .map(|b| b.vehicle_id.clone())
            .collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    async fn find_live_lock_for_location(
        &self,
        location_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Booking>> {
        Ok(self
            .bookings
            .iter()
            .find(|b| b.location_id == location_id && b.has_live_lock(now))
            .map(|b| b.clone()))
    }

    async fn expire_stale_locks(
        &self,
        location_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<u64> {
        let stale_ids: Vec<i32> = self
            .bookings
            .iter()
            .filter(|b| b.location_id == location_id && b.has_stale_lock(now))
            .map(|b| b.id)
            .collect();

        for id in &stale_ids {
            if let Some(mut b) = self.bookings.get_mut(id) {
                b.expire_lock();
            }
        }
        Ok(stale_ids.len() as u64)
    }

    async fn locations_with_stale_locks(&self, now: DateTime<Utc>) -> DomainResult<Vec<String>> {
        let mut locations: Vec<String> = self
            .bookings
            .iter()
            .filter(|b| b.has_stale_lock(now))
            .map(|b| b.location_id.clone())
            .collect();
        locations.sort();
        locations.dedup();
        Ok(locations)
    }
}

/// In-memory vehicle repository
pub struct InMemoryVehicleRepository {
    vehicles: DashMap<String, Vehicle>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self {
            vehicles: DashMap::new(),
        }
    }
}

impl Default for InMemoryVehicleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn save(&self, vehicle: Vehicle) -> DomainResult<()> {
        let duplicate = self
            .vehicles
            .iter()
            .any(|v| v.registration_number == vehicle.registration_number);
        if duplicate {
            return Err(DomainError::Conflict(format!(
                "vehicle with registration number {}",
                vehicle.registration_number
            )));
        }
        self.vehicles.insert(vehicle.id.clone(), vehicle);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Vehicle>> {
        Ok(self.vehicles.get(id).map(|v| v.clone()))
    }

    async fn find_by_id_for_user(
        &self,
        id: &str,
        user_id: &str,
    ) -> DomainResult<Option<Vehicle>> {
        Ok(self
            .vehicles
            .get(id)
            .filter(|v| v.user_id == user_id)
            .map(|v| v.clone()))
    }

    async fn update(&self, vehicle: &Vehicle) -> DomainResult<()> {
        if !self.vehicles.contains_key(&vehicle.id) {
            return Err(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: vehicle.id.clone(),
            });
        }
        let duplicate = self
            .vehicles
            .iter()
            .any(|v| v.id != vehicle.id && v.registration_number == vehicle.registration_number);
        if duplicate {
            return Err(DomainError::Conflict(format!(
                "vehicle with registration number {}",
                vehicle.registration_number
            )));
        }
        self.vehicles.insert(vehicle.id.clone(), vehicle.clone());
        Ok(())
    }

    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<Vehicle>> {
        let mut mine: Vec<Vehicle> = self
            .vehicles
            .iter()
            .filter(|v| v.user_id == user_id)
            .map(|v| v.clone())
            .collect();
        mine.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(mine)
    }

    async fn find_electric_for_user(&self, user_id: &str) -> DomainResult<Vec<Vehicle>> {
        let mut mine: Vec<Vehicle> = self
            .vehicles
            .iter()
            .filter(|v| v.user_id == user_id && v.is_electric())
            .map(|v| v.clone())
            .collect();
        mine.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(mine)
    }
}

/// In-memory repository provider
pub struct InMemoryRepositoryProvider {
    bookings: InMemoryBookingRepository,
    vehicles: InMemoryVehicleRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            bookings: InMemoryBookingRepository::new(),
            vehicles: InMemoryVehicleRepository::new(),
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::FuelType;
    use chrono::Duration;

    fn new_booking(user: &str, vehicle: &str, location: &str) -> NewBooking {
        NewBooking {
            user_id: user.to_string(),
            vehicle_id: vehicle.to_string(),
            location_id: location.to_string(),
            latitude: 41.31,
            longitude: 69.24,
            current_charge: 50,
            eta_minutes: 2.0,
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let repo = InMemoryBookingRepository::new();
        let a = repo.insert(new_booking("u1", "v1", "loc-1")).await.unwrap();
        let b = repo.insert(new_booking("u1", "v2", "loc-1")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn active_count_ignores_terminal_statuses() {
        let repo = InMemoryBookingRepository::new();
        let a = repo.insert(new_booking("u1", "v1", "loc-1")).await.unwrap();
        repo.insert(new_booking("u2", "v2", "loc-1")).await.unwrap();

        let mut arrived = a.clone();
        arrived.promote(Utc::now());
        arrived.mark_arrived();
        repo.update(&arrived).await.unwrap();

        assert_eq!(repo.count_active_for_location("loc-1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn expire_stale_locks_leaves_live_locks_alone() {
        let repo = InMemoryBookingRepository::new();
        let now = Utc::now();

        let mut stale = repo.insert(new_booking("u1", "v1", "loc-1")).await.unwrap();
        stale.promote(now - Duration::minutes(10));
        repo.update(&stale).await.unwrap();

        let mut live = repo.insert(new_booking("u2", "v2", "loc-1")).await.unwrap();
        live.promote(now);
        repo.update(&live).await.unwrap();

        let demoted = repo.expire_stale_locks("loc-1", now).await.unwrap();
        assert_eq!(demoted, 1);

        let stale = repo.find_by_id(stale.id).await.unwrap().unwrap();
        assert_eq!(stale.status, BookingStatus::Expired);
        assert!(stale.lock_expires_at.is_none());

        let live = repo.find_by_id(live.id).await.unwrap().unwrap();
        assert_eq!(live.status, BookingStatus::Locked);
    }

    #[tokio::test]
    async fn stale_lock_locations_are_distinct() {
        let repo = InMemoryBookingRepository::new();
        let now = Utc::now();

        for (user, vehicle, loc) in
            [("u1", "v1", "loc-1"), ("u2", "v2", "loc-1"), ("u3", "v3", "loc-2")]
        {
            let mut b = repo.insert(new_booking(user, vehicle, loc)).await.unwrap();
            b.promote(now - Duration::minutes(10));
            repo.update(&b).await.unwrap();
        }

        let locations = repo.locations_with_stale_locks(now).await.unwrap();
        assert_eq!(locations, vec!["loc-1".to_string(), "loc-2".to_string()]);
    }

    #[tokio::test]
    async fn duplicate_registration_number_conflicts() {
        let repo = InMemoryVehicleRepository::new();
        let v1 = Vehicle::new(
            "v1", "u1", "01A123BC", "Nexia EV", FuelType::Electric, 41.31, 69.24, 12.5,
        );
        let mut v2 = Vehicle::new(
            "v2", "u2", "01A123BC", "Spark", FuelType::Petrol, 41.31, 69.24, 14.0,
        );
        repo.save(v1).await.unwrap();
        let err = repo.save(v2.clone()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        v2.registration_number = "01B456DE".to_string();
        repo.save(v2).await.unwrap();
    }

    #[tokio::test]
    async fn wrong_user_lookup_finds_nothing() {
        let repo = InMemoryBookingRepository::new();
        let b = repo.insert(new_booking("u1", "v1", "loc-1")).await.unwrap();
        assert!(repo.find_by_id_for_user(b.id, "u2").await.unwrap().is_none());
        assert!(repo.find_by_id_for_user(b.id, "u1").await.unwrap().is_some());
    }
}
