//! ETA estimation for admission checks
//!
//! Distance is great-circle (haversine); travel time assumes a fixed
//! average city speed. The estimate is computed once at booking
//! creation and never revised.

/// Earth radius used by the haversine formula (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed average travel speed (km/h)
pub const AVERAGE_SPEED_KMH: f64 = 30.0;

/// Admission cutoff: vehicles further than this many minutes away
/// cannot pre-book
pub const MAX_ETA_MINUTES: f64 = 4.0;

/// Distance and travel-time estimate between a vehicle and a location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EtaEstimate {
    pub distance_km: f64,
    pub eta_minutes: f64,
}

impl EtaEstimate {
    /// Whether the vehicle is close enough to be admitted
    pub fn is_within_window(&self) -> bool {
        self.eta_minutes <= MAX_ETA_MINUTES
    }
}

/// Great-circle distance between two coordinates in km
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Minutes needed to cover `distance_km` at the assumed average speed
pub fn eta_minutes_for(distance_km: f64) -> f64 {
    distance_km / AVERAGE_SPEED_KMH * 60.0
}

/// Estimate distance and travel time from a vehicle position to a
/// charging location
pub fn estimate(
    vehicle_lat: f64,
    vehicle_lon: f64,
    location_lat: f64,
    location_lon: f64,
) -> EtaEstimate {
    let distance_km = haversine_km(vehicle_lat, vehicle_lon, location_lat, location_lon);
    EtaEstimate {
        distance_km,
        eta_minutes: eta_minutes_for(distance_km),
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_to_self() {
        let d = haversine_km(41.31, 69.24, 41.31, 69.24);
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = haversine_km(41.31, 69.24, 41.35, 69.30);
        let b = haversine_km(41.35, 69.30, 41.31, 69.24);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        // 1° of latitude = R * π/180 ≈ 111.19 km
        let d = haversine_km(41.0, 69.24, 42.0, 69.24);
        assert!((d - 111.19).abs() < 0.01);
    }

    #[test]
    fn eta_scales_with_distance() {
        // 30 km/h = 0.5 km per minute
        assert!((eta_minutes_for(1.0) - 2.0).abs() < 1e-9);
        assert!((eta_minutes_for(7.5) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn cutoff_is_inclusive() {
        let at_limit = EtaEstimate {
            distance_km: 2.0,
            eta_minutes: 4.0,
        };
        assert!(at_limit.is_within_window());

        let beyond = EtaEstimate {
            distance_km: 2.05,
            eta_minutes: 4.1,
        };
        assert!(!beyond.is_within_window());
    }

    #[test]
    fn nearby_vehicle_fits_the_window() {
        // ~600 m apart in central Tashkent
        let est = estimate(41.311, 69.240, 41.316, 69.243);
        assert!(est.distance_km < 1.0);
        assert!(est.is_within_window());
    }

    #[test]
    fn distant_vehicle_is_outside_the_window() {
        // Tashkent to Chirchiq, ~30 km
        let est = estimate(41.311, 69.240, 41.469, 69.582);
        assert!(est.distance_km > 10.0);
        assert!(!est.is_within_window());
    }
}
