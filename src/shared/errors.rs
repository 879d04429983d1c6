use std::fmt;

use thiserror::Error;

/// Why an admission attempt was turned away, with the values the
/// caller needs to render a useful message.
#[derive(Debug, Clone, PartialEq)]
pub enum AdmissionRejection {
    /// The (user, vehicle) pair already has a pending or locked booking.
    VehicleAlreadyQueued { vehicle_id: String },
    /// The location queue is at capacity.
    CapacityFull { current_count: u64, max_capacity: u64 },
    /// The vehicle is too far away to arrive within the admission window.
    EtaTooLong { eta_minutes: f64, distance_km: f64 },
}

impl AdmissionRejection {
    /// Stable machine-readable reason code for API payloads.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::VehicleAlreadyQueued { .. } => "vehicle_already_queued",
            Self::CapacityFull { .. } => "capacity_full",
            Self::EtaTooLong { .. } => "eta_too_long",
        }
    }
}

impl fmt::Display for AdmissionRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VehicleAlreadyQueued { vehicle_id } => {
                write!(f, "vehicle {} already has an active booking", vehicle_id)
            }
            Self::CapacityFull {
                current_count,
                max_capacity,
            } => {
                write!(f, "location queue is full ({}/{})", current_count, max_capacity)
            }
            Self::EtaTooLong {
                eta_minutes,
                distance_km,
            } => {
                write!(
                    f,
                    "estimated arrival in {:.1} min ({:.2} km away) exceeds the admission window",
                    eta_minutes, distance_km
                )
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Admission rejected: {0}")]
    AdmissionRejected(AdmissionRejection),
}

impl DomainError {
    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            // DB errors mapped from repositories contain "Database error:" prefix
            DomainError::Validation(msg) => msg.starts_with("Database error:"),
            _ => false,
        }
    }
}
