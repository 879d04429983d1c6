//! Location queue HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::booking::BookingService;
use crate::interfaces::http::common::{domain_error, ApiResponse};
use crate::interfaces::http::modules::bookings::BookingDto;

use super::dto::*;

/// Application state for location handlers
#[derive(Clone)]
pub struct LocationAppState {
    pub service: Arc<BookingService>,
}

/// Ranked pending queue for a location
#[utoipa::path(
    get,
    path = "/api/v1/locations/{location_id}/queue",
    tag = "Locations",
    params(
        ("location_id" = String, Path, description = "Charging location ID")
    ),
    responses(
        (status = 200, description = "Pending bookings ranked by priority", body = ApiResponse<LocationQueueResponse>)
    )
)]
pub async fn location_queue(
    State(state): State<LocationAppState>,
    Path(location_id): Path<String>,
) -> Result<
    Json<ApiResponse<LocationQueueResponse>>,
    (StatusCode, Json<ApiResponse<LocationQueueResponse>>),
> {
    let view = state
        .service
        .location_queue(&location_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(view.into())))
}

/// Full booking history for a location
#[utoipa::path(
    get,
    path = "/api/v1/locations/{location_id}/bookings",
    tag = "Locations",
    params(
        ("location_id" = String, Path, description = "Charging location ID")
    ),
    responses(
        (status = 200, description = "All bookings for the location", body = ApiResponse<Vec<BookingDto>>)
    )
)]
pub async fn location_bookings(
    State(state): State<LocationAppState>,
    Path(location_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, (StatusCode, Json<ApiResponse<Vec<BookingDto>>>)> {
    let bookings = state
        .service
        .location_history(&location_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(BookingDto::from).collect(),
    )))
}

/// Queue occupancy summary for a location
#[utoipa::path(
    get,
    path = "/api/v1/locations/{location_id}/queue-status",
    tag = "Locations",
    params(
        ("location_id" = String, Path, description = "Charging location ID")
    ),
    responses(
        (status = 200, description = "Queue status summary", body = ApiResponse<QueueStatusDto>)
    )
)]
pub async fn queue_status(
    State(state): State<LocationAppState>,
    Path(location_id): Path<String>,
) -> Result<Json<ApiResponse<QueueStatusDto>>, (StatusCode, Json<ApiResponse<QueueStatusDto>>)> {
    let status = state
        .service
        .queue_status(&location_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(status.into())))
}

/// Capacity gate check for a location
#[utoipa::path(
    get,
    path = "/api/v1/locations/{location_id}/admission",
    tag = "Locations",
    params(
        ("location_id" = String, Path, description = "Charging location ID")
    ),
    responses(
        (status = 200, description = "Whether the queue can take another booking", body = ApiResponse<AdmissionCheckDto>)
    )
)]
pub async fn admission_check(
    State(state): State<LocationAppState>,
    Path(location_id): Path<String>,
) -> Result<Json<ApiResponse<AdmissionCheckDto>>, (StatusCode, Json<ApiResponse<AdmissionCheckDto>>)>
{
    let check = state
        .service
        .can_admit(&location_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(check.into())))
}
