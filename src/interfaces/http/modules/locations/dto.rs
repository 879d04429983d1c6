//! Location queue DTOs

use serde::Serialize;
use utoipa::ToSchema;

use crate::application::booking::{
    AdmissionCheck, EstimatedWait, QueueStatus, QueueView, ScoredBooking,
};
use crate::interfaces::http::modules::bookings::BookingDto;

/// One ranked entry in a location queue
#[derive(Debug, Serialize, ToSchema)]
pub struct QueueEntryDto {
    pub booking: BookingDto,
    pub priority_score: i64,
    /// Minutes this booking has been waiting in the queue
    pub wait_minutes: f64,
}

impl From<ScoredBooking> for QueueEntryDto {
    fn from(entry: ScoredBooking) -> Self {
        Self {
            priority_score: entry.score,
            wait_minutes: entry.wait_minutes,
            booking: entry.booking.into(),
        }
    }
}

/// Estimated wait derived from pending ETAs
#[derive(Debug, Serialize, ToSchema)]
pub struct EstimatedWaitDto {
    pub average: i64,
    pub maximum: i64,
}

impl From<EstimatedWait> for EstimatedWaitDto {
    fn from(wait: EstimatedWait) -> Self {
        Self {
            average: wait.average_minutes,
            maximum: wait.maximum_minutes,
        }
    }
}

/// Queue occupancy summary for a location
#[derive(Debug, Serialize, ToSchema)]
pub struct QueueStatusDto {
    pub is_full: bool,
    pub current_count: u64,
    pub max_capacity: u64,
    pub remaining_slots: u64,
    pub utilization_percentage: u32,
    /// LOW, MEDIUM, HIGH or FULL
    pub status: String,
    pub estimated_wait_minutes: EstimatedWaitDto,
}

impl From<QueueStatus> for QueueStatusDto {
    fn from(status: QueueStatus) -> Self {
        Self {
            is_full: status.is_full,
            current_count: status.current_count,
            max_capacity: status.max_capacity,
            remaining_slots: status.remaining_slots,
            utilization_percentage: status.utilization_percentage,
            status: status.load.as_str().to_string(),
            estimated_wait_minutes: status.estimated_wait.into(),
        }
    }
}

/// Ranked queue plus its status summary
#[derive(Debug, Serialize, ToSchema)]
pub struct LocationQueueResponse {
    pub queue: Vec<QueueEntryDto>,
    pub status: QueueStatusDto,
}

impl From<QueueView> for LocationQueueResponse {
    fn from(view: QueueView) -> Self {
        Self {
            queue: view.entries.into_iter().map(QueueEntryDto::from).collect(),
            status: view.status.into(),
        }
    }
}

/// Result of the capacity gate check
#[derive(Debug, Serialize, ToSchema)]
pub struct AdmissionCheckDto {
    pub can_admit: bool,
    pub current_count: u64,
    pub max_capacity: u64,
}

impl From<AdmissionCheck> for AdmissionCheckDto {
    fn from(check: AdmissionCheck) -> Self {
        Self {
            can_admit: check.can_admit,
            current_count: check.current_count,
            max_capacity: check.max_capacity,
        }
    }
}
