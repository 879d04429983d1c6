//! Booking aggregate
//!
//! Contains the Booking entity, its status machine, and the
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{
    lock_duration, Booking, BookingStatus, NewBooking, LOCK_DURATION_MINUTES, MAX_QUEUE_CAPACITY,
};
pub use repository::BookingRepository;
