//! Feature modules for the HTTP API
//!
//! Each module owns its DTOs, handlers and state struct.

pub mod bookings;
pub mod health;
pub mod locations;
pub mod metrics;
pub mod vehicles;
