//! Locations module: queue views, occupancy and the capacity gate

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
