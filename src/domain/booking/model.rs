//! Pre-booking domain entity

use chrono::{DateTime, Duration, Utc};

/// Maximum active (pending + locked) bookings per location
pub const MAX_QUEUE_CAPACITY: u64 = 5;

/// How long a granted slot lock lasts before it goes stale
pub const LOCK_DURATION_MINUTES: i64 = 4;

/// Lock duration as a chrono duration
pub fn lock_duration() -> Duration {
    Duration::minutes(LOCK_DURATION_MINUTES)
}

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Waiting in the location queue
    Pending,
    /// Holds the location's slot lock
    Locked,
    /// Lock ran out before the driver arrived
    Expired,
    /// Driver arrived while holding the lock
    Arrived,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Locked => "locked",
            Self::Expired => "expired",
            Self::Arrived => "arrived",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "pending" => Self::Pending,
            "locked" => Self::Locked,
            "expired" => Self::Expired,
            "arrived" => Self::Arrived,
            _ => Self::Expired,
        }
    }

    /// Pending and locked bookings occupy a queue slot
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Locked)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Charging slot pre-booking
#[derive(Debug, Clone)]
pub struct Booking {
    /// Unique booking ID
    pub id: i32,
    /// Owning user ID
    pub user_id: String,
    /// Vehicle the slot is booked for
    pub vehicle_id: String,
    /// Charging location ID
    pub location_id: String,
    /// Charging location latitude, as supplied with the request
    pub latitude: f64,
    /// Charging location longitude, as supplied with the request
    pub longitude: f64,
    /// Battery percentage at booking time (0..=100)
    pub current_charge: i32,
    /// Estimated minutes to reach the location, fixed at creation
    pub eta_minutes: f64,
    /// Current status
    pub status: BookingStatus,
    /// When the slot lock runs out (set while locked)
    pub lock_expires_at: Option<DateTime<Utc>>,
    /// When the booking was created
    pub created_at: DateTime<Utc>,
}

/// Fields needed to insert a new pending booking
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: String,
    pub vehicle_id: String,
    pub location_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub current_charge: i32,
    pub eta_minutes: f64,
}

impl Booking {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i32,
        user_id: impl Into<String>,
        vehicle_id: impl Into<String>,
        location_id: impl Into<String>,
        latitude: f64,
        longitude: f64,
        current_charge: i32,
        eta_minutes: f64,
    ) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            vehicle_id: vehicle_id.into(),
            location_id: location_id.into(),
            latitude,
            longitude,
            current_charge,
            eta_minutes,
            status: BookingStatus::Pending,
            lock_expires_at: None,
            created_at: Utc::now(),
        }
    }

    /// Grant the slot lock (pending -> locked)
    pub fn promote(&mut self, now: DateTime<Utc>) {
        self.status = BookingStatus::Locked;
        self.lock_expires_at = Some(now + lock_duration());
    }

    /// Demote a stale lock (locked -> expired)
    pub fn expire_lock(&mut self) {
        self.status = BookingStatus::Expired;
        self.lock_expires_at = None;
    }

    /// Confirm arrival (locked -> arrived)
    pub fn mark_arrived(&mut self) {
        self.status = BookingStatus::Arrived;
        self.lock_expires_at = None;
    }

    /// Check if this booking occupies a queue slot
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Check if this booking holds a lock that has not yet run out.
    /// Status alone is not enough: a locked row past its expiry no
    /// longer counts, even before a sweep demotes it.
    pub fn has_live_lock(&self, now: DateTime<Utc>) -> bool {
        self.status == BookingStatus::Locked
            && self.lock_expires_at.is_some_and(|t| t > now)
    }

    /// Check if this booking holds a lock that has run out
    pub fn has_stale_lock(&self, now: DateTime<Utc>) -> bool {
        self.status == BookingStatus::Locked
            && self.lock_expires_at.is_some_and(|t| t <= now)
    }

    /// Minutes spent waiting since creation
    pub fn wait_minutes(&self, now: DateTime<Utc>) -> f64 {
        (now - self.created_at).num_milliseconds() as f64 / 60_000.0
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_booking() -> Booking {
        Booking::new(1, "user-1", "veh-1", "loc-1", 41.31, 69.24, 50, 2.0)
    }

    #[test]
    fn new_booking_is_pending() {
        let b = sample_booking();
        assert_eq!(b.status, BookingStatus::Pending);
        assert!(b.is_active());
        assert!(b.lock_expires_at.is_none());
        assert_eq!(b.current_charge, 50);
    }

    #[test]
    fn promote_grants_four_minute_lock() {
        let mut b = sample_booking();
        let now = Utc::now();
        b.promote(now);
        assert_eq!(b.status, BookingStatus::Locked);
        assert_eq!(b.lock_expires_at, Some(now + Duration::minutes(4)));
        assert!(b.is_active());
    }

    #[test]
    fn expire_lock_clears_expiry() {
        let mut b = sample_booking();
        b.promote(Utc::now());
        b.expire_lock();
        assert_eq!(b.status, BookingStatus::Expired);
        assert!(b.lock_expires_at.is_none());
        assert!(!b.is_active());
    }

    #[test]
    fn mark_arrived_clears_expiry() {
        let mut b = sample_booking();
        b.promote(Utc::now());
        b.mark_arrived();
        assert_eq!(b.status, BookingStatus::Arrived);
        assert!(b.lock_expires_at.is_none());
        assert!(!b.is_active());
    }

    #[test]
    fn live_lock_depends_on_wall_clock() {
        let mut b = sample_booking();
        let now = Utc::now();
        b.promote(now);
        assert!(b.has_live_lock(now));
        assert!(!b.has_stale_lock(now));

        // 4 minutes later the same row is stale, status unchanged
        let later = now + Duration::minutes(4);
        assert!(!b.has_live_lock(later));
        assert!(b.has_stale_lock(later));
        assert_eq!(b.status, BookingStatus::Locked);
    }

    #[test]
    fn pending_booking_holds_no_lock() {
        let b = sample_booking();
        let now = Utc::now();
        assert!(!b.has_live_lock(now));
        assert!(!b.has_stale_lock(now));
    }

    #[test]
    fn wait_minutes_grows_with_time() {
        let b = sample_booking();
        let now = b.created_at + Duration::minutes(10);
        assert!((b.wait_minutes(now) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn status_display_roundtrip() {
        for status in &[
            BookingStatus::Pending,
            BookingStatus::Locked,
            BookingStatus::Expired,
            BookingStatus::Arrived,
        ] {
            let s = status.as_str();
            let parsed = BookingStatus::from_str(s);
            assert_eq!(&parsed, status);
        }
    }

    #[test]
    fn unknown_status_defaults_to_expired() {
        let s = BookingStatus::from_str("Unknown");
        assert_eq!(s, BookingStatus::Expired);
    }
}
