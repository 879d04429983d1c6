pub mod booking;

// Re-export key types for convenience
pub use booking::{
    start_queue_sweeper_task, AdmissionCheck, AdmissionRequest, AdmittedBooking,
    AvailableVehicles, BookingService, QueueReconciler, QueueStatus, QueueView,
    SharedLockRegistry,
};
