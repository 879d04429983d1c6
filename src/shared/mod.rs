pub mod errors;
pub mod shutdown;

pub use errors::{AdmissionRejection, DomainError};
pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
