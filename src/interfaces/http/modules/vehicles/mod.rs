//! Vehicles module: fleet registry and booking eligibility

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
