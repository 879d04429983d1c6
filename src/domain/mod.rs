pub mod booking;
pub mod repositories;
pub mod vehicle;

// Re-export commonly used types
pub use booking::{Booking, BookingStatus, NewBooking};
pub use repositories::{DomainResult, RepositoryProvider};
pub use vehicle::{FuelType, Vehicle};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
