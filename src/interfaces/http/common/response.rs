//! Common API response envelope

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;
use crate::shared::errors::AdmissionRejection;

/// Standard API response wrapper.
///
/// Every REST endpoint wraps its payload in this envelope.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload. `null` on failure
    pub data: Option<T>,
    /// Error description. `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Failure envelope that still carries a payload, used when a
    /// rejection comes with structured detail fields
    pub fn error_with(data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(message.into()),
        }
    }
}

/// Map a domain error to its HTTP status code
pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::AdmissionRejected(rejection) => match rejection {
            AdmissionRejection::VehicleAlreadyQueued { .. } => StatusCode::CONFLICT,
            AdmissionRejection::CapacityFull { .. } => StatusCode::TOO_MANY_REQUESTS,
            AdmissionRejection::EtaTooLong { .. } => StatusCode::BAD_REQUEST,
        },
    }
}

/// Map a domain error to the standard `(status, envelope)` failure
/// tuple used by handlers
pub fn domain_error<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    (status_for(&err), Json(ApiResponse::error(err.to_string())))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_statuses_follow_the_reason() {
        let queued = DomainError::AdmissionRejected(AdmissionRejection::VehicleAlreadyQueued {
            vehicle_id: "v1".to_string(),
        });
        let full = DomainError::AdmissionRejected(AdmissionRejection::CapacityFull {
            current_count: 5,
            max_capacity: 5,
        });
        let far = DomainError::AdmissionRejected(AdmissionRejection::EtaTooLong {
            eta_minutes: 6.2,
            distance_km: 3.1,
        });

        assert_eq!(status_for(&queued), StatusCode::CONFLICT);
        assert_eq!(status_for(&full), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(status_for(&far), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = DomainError::NotFound {
            entity: "Booking",
            field: "id",
            value: "7".to_string(),
        };
        assert_eq!(status_for(&err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn error_envelope_hides_error_field_on_success() {
        let ok = ApiResponse::success(1);
        let body = serde_json::to_string(&ok).unwrap();
        assert_eq!(body, r#"{"success":true,"data":1}"#);

        let err = ApiResponse::<i32>::error("boom");
        let body = serde_json::to_string(&err).unwrap();
        assert_eq!(body, r#"{"success":false,"data":null,"error":"boom"}"#);
    }
}
