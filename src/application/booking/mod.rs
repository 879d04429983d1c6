pub mod eta;
pub mod locks;
pub mod priority;
pub mod reconciler;
pub mod service;
pub mod sweeper;

pub use eta::EtaEstimate;
pub use locks::{LockRegistry, SharedLockRegistry};
pub use priority::{priority_score, rank_pending, ScoredBooking};
pub use reconciler::{QueueReconciler, ReconcileOutcome};
pub use service::{
    AdmissionCheck, AdmissionRequest, AdmittedBooking, AvailableVehicles, BookingService,
    EstimatedWait, QueueLoad, QueueStatus, QueueView,
};
pub use sweeper::start_queue_sweeper_task;
