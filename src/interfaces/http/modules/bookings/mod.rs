//! Bookings module: pre-booking creation, lookup and arrival

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
