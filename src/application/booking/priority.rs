//! Priority scoring for pending bookings
//!
//! Scores are deterministic integers computed from the booking's ETA,
//! battery level, and queue wait. They are never stored; every
//! reconcile pass and queue read recomputes them.

use chrono::{DateTime, Utc};

use crate::domain::booking::Booking;

/// A pending booking with its computed priority
#[derive(Debug, Clone)]
pub struct ScoredBooking {
    pub booking: Booking,
    pub score: i64,
    pub wait_minutes: f64,
}

/// Compute the priority score for a booking at a given instant.
///
/// Closer vehicles, lower batteries, and longer waits rank higher.
/// The urgency rules are first-match: a booking gets at most one
/// urgency bonus.
pub fn priority_score(booking: &Booking, now: DateTime<Utc>) -> i64 {
    let mut score = 100.0;

    // Proximity: up to 40 points, fades to 0 at a 4 minute ETA
    score += (40.0 - booking.eta_minutes * 10.0).max(0.0);

    // Battery: lower charge earns a bigger bonus
    let charge = booking.current_charge;
    score += if charge <= 20 {
        35.0
    } else if charge <= 40 {
        25.0
    } else if charge <= 60 {
        15.0
    } else if charge <= 80 {
        5.0
    } else {
        0.0
    };

    // Queue wait: 1.5 points per minute, capped at 15
    let wait_minutes = booking.wait_minutes(now);
    score += (wait_minutes * 1.5).min(15.0);

    // Urgency, first matching rule only
    if booking.eta_minutes > 3.0 && charge < 15 {
        score += 10.0;
    } else if charge < 10 {
        score += 10.0;
    } else if booking.eta_minutes < 1.0 && charge < 30 {
        score += 8.0;
    }

    score.round() as i64
}

/// Score and rank pending bookings: highest score first, ties broken
/// by creation time (earlier wins).
pub fn rank_pending(bookings: Vec<Booking>, now: DateTime<Utc>) -> Vec<ScoredBooking> {
    let mut scored: Vec<ScoredBooking> = bookings
        .into_iter()
        .map(|booking| ScoredBooking {
            score: priority_score(&booking, now),
            wait_minutes: booking.wait_minutes(now),
            booking,
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.booking.created_at.cmp(&b.booking.created_at))
    });
    scored
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_booking(charge: i32, eta_minutes: f64, waited_minutes: i64) -> Booking {
        let mut b = Booking::new(1, "user-1", "veh-1", "loc-1", 41.31, 69.24, charge, eta_minutes);
        b.created_at = Utc::now() - Duration::minutes(waited_minutes);
        b
    }

    #[test]
    fn close_low_battery_booking() {
        // 100 + eta 35 + charge 35 + wait 0 + urgency 8 (eta < 1, charge < 30)
        let b = sample_booking(15, 0.5, 0);
        assert_eq!(priority_score(&b, Utc::now()), 178);
    }

    #[test]
    fn far_full_battery_booking() {
        // 100 + eta 0 + charge 0 + wait 15 (capped) + urgency 0
        let b = sample_booking(85, 4.0, 20);
        assert_eq!(priority_score(&b, Utc::now()), 115);
    }

    #[test]
    fn far_and_nearly_empty_gets_first_urgency_rule() {
        // 100 + eta 5 + charge 35 + wait 0 + urgency 10 (eta > 3, charge < 15)
        let b = sample_booking(12, 3.5, 0);
        assert_eq!(priority_score(&b, Utc::now()), 150);
    }

    #[test]
    fn critical_battery_gets_second_urgency_rule() {
        // 100 + eta 20 + charge 35 + wait 0 + urgency 10 (charge < 10)
        let b = sample_booking(5, 2.0, 0);
        assert_eq!(priority_score(&b, Utc::now()), 165);
    }

    #[test]
    fn urgency_rules_never_stack() {
        // charge 5 matches both the first and second rule; only the
        // first applies: 100 + eta 5 + charge 35 + wait 0 + 10
        let b = sample_booking(5, 3.5, 0);
        assert_eq!(priority_score(&b, Utc::now()), 150);
    }

    #[test]
    fn wait_bonus_is_capped() {
        // 100 + eta 40 + charge 0 + wait capped at 15
        let b = sample_booking(100, 0.0, 30);
        assert_eq!(priority_score(&b, Utc::now()), 155);
    }

    #[test]
    fn fractional_scores_round_half_up() {
        // 100 + eta 37.5 + charge 15 + wait 0 = 152.5 -> 153
        let b = sample_booking(50, 0.25, 0);
        assert_eq!(priority_score(&b, Utc::now()), 153);
    }

    #[test]
    fn ranking_prefers_higher_score() {
        let now = Utc::now();
        let low = sample_booking(85, 4.0, 0);
        let mut high = sample_booking(15, 0.5, 0);
        high.id = 2;

        let ranked = rank_pending(vec![low, high], now);
        assert_eq!(ranked[0].booking.id, 2);
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn equal_scores_rank_by_creation_time() {
        let now = Utc::now();
        // Both waits are past the 10 minute cap, so the scores are
        // identical and only creation time separates them
        let mut older = sample_booking(50, 2.0, 20);
        older.id = 1;
        let mut newer = sample_booking(50, 2.0, 15);
        newer.id = 2;

        let ranked = rank_pending(vec![newer.clone(), older.clone()], now);
        assert_eq!(ranked[0].score, ranked[1].score);
        assert_eq!(ranked[0].booking.id, 1);
        assert_eq!(ranked[1].booking.id, 2);
    }
}
