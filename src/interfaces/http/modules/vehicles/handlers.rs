//! Vehicle registry HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use crate::application::booking::BookingService;
use crate::domain::vehicle::{FuelType, Vehicle};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{domain_error, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::Identity;
use crate::shared::errors::DomainError;

use super::dto::*;

/// Application state for vehicle handlers
#[derive(Clone)]
pub struct VehicleAppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub service: Arc<BookingService>,
}

/// Register a vehicle for the calling user
#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    request_body = CreateVehicleRequest,
    responses(
        (status = 201, description = "Vehicle registered", body = ApiResponse<VehicleDto>),
        (status = 400, description = "Unknown fuel type"),
        (status = 409, description = "Registration number already taken")
    )
)]
pub async fn create_vehicle(
    State(state): State<VehicleAppState>,
    Extension(identity): Extension<Identity>,
    ValidatedJson(request): ValidatedJson<CreateVehicleRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<VehicleDto>>),
    (StatusCode, Json<ApiResponse<VehicleDto>>),
> {
    let Some(fuel_type) = FuelType::from_str(&request.fuel_type) else {
        return Err(domain_error(DomainError::Validation(format!(
            "unknown fuel type '{}', expected Petrol, Diesel or Electric",
            request.fuel_type
        ))));
    };

    let vehicle = Vehicle::new(
        Uuid::new_v4().to_string(),
        &identity.user_id,
        request.registration_number,
        request.make,
        fuel_type,
        request.latitude,
        request.longitude,
        request.ideal_mileage,
    );

    state
        .repos
        .vehicles()
        .save(vehicle.clone())
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(vehicle.into())),
    ))
}

/// List the caller's vehicles
#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    responses(
        (status = 200, description = "Vehicles registered by the calling user", body = ApiResponse<Vec<VehicleDto>>)
    )
)]
pub async fn list_vehicles(
    State(state): State<VehicleAppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<ApiResponse<Vec<VehicleDto>>>, (StatusCode, Json<ApiResponse<Vec<VehicleDto>>>)> {
    let vehicles = state
        .repos
        .vehicles()
        .find_for_user(&identity.user_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        vehicles.into_iter().map(VehicleDto::from).collect(),
    )))
}

/// Electric vehicles that could book at a location right now
#[utoipa::path(
    get,
    path = "/api/v1/vehicles/available",
    tag = "Vehicles",
    params(AvailableVehiclesQuery),
    responses(
        (status = 200, description = "Bookable vehicles plus the queue status", body = ApiResponse<AvailableVehiclesResponse>)
    )
)]
pub async fn available_vehicles(
    State(state): State<VehicleAppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<AvailableVehiclesQuery>,
) -> Result<
    Json<ApiResponse<AvailableVehiclesResponse>>,
    (StatusCode, Json<ApiResponse<AvailableVehiclesResponse>>),
> {
    let available = state
        .service
        .available_vehicles(&identity.user_id, &query.location_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(available.into())))
}

/// Get one vehicle by id
#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{vehicle_id}",
    tag = "Vehicles",
    params(
        ("vehicle_id" = String, Path, description = "Vehicle ID")
    ),
    responses(
        (status = 200, description = "Vehicle details", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<VehicleAppState>,
    Extension(identity): Extension<Identity>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<ApiResponse<VehicleDto>>, (StatusCode, Json<ApiResponse<VehicleDto>>)> {
    let Some(vehicle) = state
        .repos
        .vehicles()
        .find_by_id_for_user(&vehicle_id, &identity.user_id)
        .await
        .map_err(domain_error)?
    else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Vehicle not found".to_string())),
        ));
    };

    Ok(Json(ApiResponse::success(vehicle.into())))
}

/// Update a vehicle's position, mileage and make
#[utoipa::path(
    put,
    path = "/api/v1/vehicles/{vehicle_id}",
    tag = "Vehicles",
    params(
        ("vehicle_id" = String, Path, description = "Vehicle ID")
    ),
    request_body = UpdateVehicleRequest,
    responses(
        (status = 200, description = "Updated vehicle", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn update_vehicle(
    State(state): State<VehicleAppState>,
    Extension(identity): Extension<Identity>,
    Path(vehicle_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleDto>>, (StatusCode, Json<ApiResponse<VehicleDto>>)> {
    let Some(mut vehicle) = state
        .repos
        .vehicles()
        .find_by_id_for_user(&vehicle_id, &identity.user_id)
        .await
        .map_err(domain_error)?
    else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Vehicle not found".to_string())),
        ));
    };

    vehicle.make = request.make;
    vehicle.latitude = request.latitude;
    vehicle.longitude = request.longitude;
    vehicle.ideal_mileage = request.ideal_mileage;

    state
        .repos
        .vehicles()
        .update(&vehicle)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(vehicle.into())))
}
