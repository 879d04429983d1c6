//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::booking::BookingRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::vehicle::VehicleRepository;

use super::booking_repository::SeaOrmBookingRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let booking = repos.bookings().find_by_id(42).await?;
/// let vehicles = repos.vehicles().find_for_user("user-1").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    bookings: SeaOrmBookingRepository,
    vehicles: SeaOrmVehicleRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            bookings: SeaOrmBookingRepository::new(db.clone()),
            vehicles: SeaOrmVehicleRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }
}
