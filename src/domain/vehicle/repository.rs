//! Vehicle repository interface

use async_trait::async_trait;

use super::model::Vehicle;
use crate::domain::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Save a newly registered vehicle.
    /// Fails with Conflict when the registration number is taken.
    async fn save(&self, vehicle: Vehicle) -> DomainResult<()>;

    /// Find vehicle by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Vehicle>>;

    /// Find vehicle by ID scoped to its owner
    async fn find_by_id_for_user(&self, id: &str, user_id: &str)
        -> DomainResult<Option<Vehicle>>;

    /// Update an existing vehicle
    async fn update(&self, vehicle: &Vehicle) -> DomainResult<()>;

    /// All vehicles registered by a user
    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<Vehicle>>;

    /// A user's electric vehicles
    async fn find_electric_for_user(&self, user_id: &str) -> DomainResult<Vec<Vehicle>>;
}
