//! Booking DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::booking::Booking;
use crate::shared::errors::AdmissionRejection;

/// Request to create a pre-booking
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    /// Vehicle making the trip
    #[validate(length(min = 1))]
    pub vehicle_id: String,
    /// Charging location to queue at
    #[validate(length(min = 1))]
    pub location_id: String,
    /// Charging location latitude
    #[validate(range(min = -90.0, max = 90.0))]
    pub location_latitude: f64,
    /// Charging location longitude
    #[validate(range(min = -180.0, max = 180.0))]
    pub location_longitude: f64,
    /// Battery level percent at booking time
    #[validate(range(min = 0, max = 100))]
    pub current_charge: i32,
}

/// Booking details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
    pub id: i32,
    pub user_id: String,
    pub vehicle_id: String,
    pub location_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub current_charge: i32,
    pub eta_minutes: f64,
    /// pending, locked, expired or arrived
    pub status: String,
    pub lock_expires_at: Option<String>,
    pub created_at: String,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            vehicle_id: b.vehicle_id,
            location_id: b.location_id,
            latitude: b.latitude,
            longitude: b.longitude,
            current_charge: b.current_charge,
            eta_minutes: b.eta_minutes,
            status: b.status.as_str().to_string(),
            lock_expires_at: b.lock_expires_at.map(|t| t.to_rfc3339()),
            created_at: b.created_at.to_rfc3339(),
        }
    }
}

/// Response from creating a booking
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingCreatedResponse {
    pub booking: BookingDto,
    /// Estimated travel time to the location in minutes
    pub eta_minutes: f64,
    /// Great-circle distance to the location in kilometers
    pub distance_km: f64,
}

/// Structured details for a rejected admission
#[derive(Debug, Serialize, ToSchema)]
pub struct AdmissionRejectionDto {
    /// Machine-readable reason: vehicle_already_queued, capacity_full
    /// or eta_too_long
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta_minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl From<&AdmissionRejection> for AdmissionRejectionDto {
    fn from(rejection: &AdmissionRejection) -> Self {
        let mut dto = Self {
            reason: rejection.reason().to_string(),
            current_count: None,
            max_capacity: None,
            eta_minutes: None,
            distance_km: None,
        };
        match rejection {
            AdmissionRejection::VehicleAlreadyQueued { .. } => {}
            AdmissionRejection::CapacityFull {
                current_count,
                max_capacity,
            } => {
                dto.current_count = Some(*current_count);
                dto.max_capacity = Some(*max_capacity);
            }
            AdmissionRejection::EtaTooLong {
                eta_minutes,
                distance_km,
            } => {
                dto.eta_minutes = Some(*eta_minutes);
                dto.distance_km = Some(*distance_km);
            }
        }
        dto
    }
}
