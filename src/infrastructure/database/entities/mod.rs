//! Database entities module

pub mod booking;
pub mod vehicle;

pub use booking::Entity as Booking;
pub use vehicle::Entity as Vehicle;
