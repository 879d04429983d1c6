//! Vehicle registry DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::booking::AvailableVehicles;
use crate::domain::vehicle::Vehicle;
use crate::interfaces::http::modules::locations::QueueStatusDto;

/// Request to register a vehicle
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVehicleRequest {
    /// Registration plate, unique across the fleet
    #[validate(length(min = 1, max = 20))]
    pub registration_number: String,
    /// Manufacturer / model label
    #[validate(length(min = 1, max = 100))]
    pub make: String,
    /// Petrol, Diesel or Electric
    pub fuel_type: String,
    /// Current latitude
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    /// Current longitude
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    /// Ideal mileage (km per unit of fuel)
    #[validate(range(min = 0.0))]
    pub ideal_mileage: f64,
}

/// Request to update a vehicle's position and details
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub make: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = 0.0))]
    pub ideal_mileage: f64,
}

/// Query parameters for the available-vehicles lookup
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailableVehiclesQuery {
    /// Charging location the vehicles would queue at
    pub location_id: String,
}

/// Vehicle details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleDto {
    pub id: String,
    pub user_id: String,
    pub registration_number: String,
    pub make: String,
    /// Petrol, Diesel or Electric
    pub fuel_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub ideal_mileage: f64,
    pub created_at: String,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            user_id: v.user_id,
            registration_number: v.registration_number,
            make: v.make,
            fuel_type: v.fuel_type.as_str().to_string(),
            latitude: v.latitude,
            longitude: v.longitude,
            ideal_mileage: v.ideal_mileage,
            created_at: v.created_at.to_rfc3339(),
        }
    }
}

/// Vehicles that could book at a location right now
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailableVehiclesResponse {
    pub vehicles: Vec<VehicleDto>,
    pub status: QueueStatusDto,
}

impl From<AvailableVehicles> for AvailableVehiclesResponse {
    fn from(available: AvailableVehicles) -> Self {
        Self {
            vehicles: available
                .vehicles
                .into_iter()
                .map(VehicleDto::from)
                .collect(),
            status: available.status.into(),
        }
    }
}
