//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` — unified access to all per-aggregate repositories
//! - `DomainResult` — standard result type for domain operations

use super::booking::BookingRepository;
use super::vehicle::VehicleRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let pending = repos.bookings().find_pending_for_location("loc-1").await?;
///     let vehicle = repos.vehicles().find_by_id("veh-1").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn bookings(&self) -> &dyn BookingRepository;
    fn vehicles(&self) -> &dyn VehicleRepository;
}
