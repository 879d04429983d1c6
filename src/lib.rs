//! # FleetEase Pre-Booking Service
//!
//! Pre-booking queue for charging electric fleet vehicles: admission
//! control, priority-ranked queues, slot locks and arrival tracking.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Booking admission, queue reconciliation, sweeper
//! - **infrastructure**: Database (SeaORM), in-memory storage
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Errors and shutdown plumbing shared across layers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;

// Re-export the application service
pub use application::{BookingService, QueueReconciler};
