//! Vehicle aggregate
//!
//! Contains the Vehicle registry entity and repository interface.

pub mod model;
pub mod repository;

pub use model::{FuelType, Vehicle};
pub use repository::VehicleRepository;
