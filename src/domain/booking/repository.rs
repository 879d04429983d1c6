//! Booking repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Booking, NewBooking};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new pending booking, returning it with its assigned ID
    async fn insert(&self, booking: NewBooking) -> DomainResult<Booking>;

    /// Find booking by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>>;

    /// Find booking by ID scoped to its owner
    async fn find_by_id_for_user(&self, id: i32, user_id: &str)
        -> DomainResult<Option<Booking>>;

    /// Persist the status / lock expiry of an existing booking
    async fn update(&self, booking: &Booking) -> DomainResult<()>;

    /// All pending bookings for a location
    async fn find_pending_for_location(&self, location_id: &str) -> DomainResult<Vec<Booking>>;

    /// Full booking history for a location (any status),
    /// ordered by ETA then creation time
    async fn find_all_for_location(&self, location_id: &str) -> DomainResult<Vec<Booking>>;

    /// A user's bookings, newest first
    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<Booking>>;

    /// Count of active (pending + locked) bookings for a location
    async fn count_active_for_location(&self, location_id: &str) -> DomainResult<u64>;

    /// The active booking for a (user, vehicle) pair, if any
    async fn find_active_for_vehicle(
        &self,
        user_id: &str,
        vehicle_id: &str,
    ) -> DomainResult<Option<Booking>>;

    /// Vehicle IDs the user currently has queued anywhere
    async fn active_vehicle_ids_for_user(&self, user_id: &str) -> DomainResult<Vec<String>>;

    /// The location's locked booking whose lock is still live at `now`
    async fn find_live_lock_for_location(
        &self,
        location_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Booking>>;

    /// Demote every stale lock at the location (locked -> expired),
    /// returning how many rows changed
    async fn expire_stale_locks(
        &self,
        location_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<u64>;

    /// Distinct location IDs that currently have stale locks
    async fn locations_with_stale_locks(&self, now: DateTime<Utc>) -> DomainResult<Vec<String>>;
}
