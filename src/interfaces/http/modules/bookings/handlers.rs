//! Booking HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::application::booking::{AdmissionRequest, BookingService};
use crate::interfaces::http::common::{domain_error, status_for, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::Identity;
use crate::shared::errors::DomainError;

use super::dto::*;

/// Application state for booking handlers
#[derive(Clone)]
pub struct BookingAppState {
    pub service: Arc<BookingService>,
}

/// Create a pre-booking for a charging location
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking admitted to the queue", body = ApiResponse<BookingCreatedResponse>),
        (status = 400, description = "Vehicle is not electric or is too far away"),
        (status = 404, description = "Vehicle not found"),
        (status = 409, description = "Vehicle already has an active booking"),
        (status = 429, description = "Location queue is at capacity")
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    Extension(identity): Extension<Identity>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<BookingCreatedResponse>>),
    (StatusCode, Json<ApiResponse<AdmissionRejectionDto>>),
> {
    let admitted = state
        .service
        .create_booking(
            &identity.user_id,
            AdmissionRequest {
                vehicle_id: request.vehicle_id,
                location_id: request.location_id,
                location_latitude: request.location_latitude,
                location_longitude: request.location_longitude,
                current_charge: request.current_charge,
            },
        )
        .await
        .map_err(|e| {
            let status = status_for(&e);
            match &e {
                // Rejections carry structured fields the client renders
                DomainError::AdmissionRejected(rejection) => {
                    let dto = AdmissionRejectionDto::from(rejection);
                    (status, Json(ApiResponse::error_with(dto, e.to_string())))
                }
                _ => (status, Json(ApiResponse::error(e.to_string()))),
            }
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BookingCreatedResponse {
            eta_minutes: admitted.estimate.eta_minutes,
            distance_km: admitted.estimate.distance_km,
            booking: admitted.booking.into(),
        })),
    ))
}

/// List the caller's bookings, newest first
#[utoipa::path(
    get,
    path = "/api/v1/bookings/my",
    tag = "Bookings",
    responses(
        (status = 200, description = "Bookings for the calling user", body = ApiResponse<Vec<BookingDto>>)
    )
)]
pub async fn my_bookings(
    State(state): State<BookingAppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, (StatusCode, Json<ApiResponse<Vec<BookingDto>>>)> {
    let bookings = state
        .service
        .my_bookings(&identity.user_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(BookingDto::from).collect(),
    )))
}

/// Get one booking by id
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{booking_id}",
    tag = "Bookings",
    params(
        ("booking_id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    Extension(identity): Extension<Identity>,
    Path(booking_id): Path<i32>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let booking = state
        .service
        .get_booking(&identity.user_id, booking_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(booking.into())))
}

/// Report arrival for a locked booking
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{booking_id}/arrived",
    tag = "Bookings",
    params(
        ("booking_id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Arrival recorded, slot released", body = ApiResponse<BookingDto>),
        (status = 400, description = "Booking does not hold the lock"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn mark_arrived(
    State(state): State<BookingAppState>,
    Extension(identity): Extension<Identity>,
    Path(booking_id): Path<i32>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let booking = state
        .service
        .mark_arrived(&identity.user_id, booking_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(booking.into())))
}
