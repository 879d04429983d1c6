//! Vehicle registry entity

use chrono::{DateTime, Utc};

/// Vehicle fuel type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Petrol => "Petrol",
            Self::Diesel => "Diesel",
            Self::Electric => "Electric",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Petrol" => Some(Self::Petrol),
            "Diesel" => Some(Self::Diesel),
            "Electric" => Some(Self::Electric),
            _ => None,
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registered fleet vehicle
#[derive(Debug, Clone)]
pub struct Vehicle {
    /// Unique vehicle ID (UUID assigned at registration)
    pub id: String,
    /// Owning user ID
    pub user_id: String,
    /// Registration plate, unique across the fleet
    pub registration_number: String,
    /// Manufacturer / model label
    pub make: String,
    /// Fuel type; only electric vehicles can pre-book a slot
    pub fuel_type: FuelType,
    /// Last known latitude
    pub latitude: f64,
    /// Last known longitude
    pub longitude: f64,
    /// Ideal mileage (km per unit of fuel)
    pub ideal_mileage: f64,
    /// When the vehicle was registered
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        registration_number: impl Into<String>,
        make: impl Into<String>,
        fuel_type: FuelType,
        latitude: f64,
        longitude: f64,
        ideal_mileage: f64,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            registration_number: registration_number.into(),
            make: make.into(),
            fuel_type,
            latitude,
            longitude,
            ideal_mileage,
            created_at: Utc::now(),
        }
    }

    /// Only electric vehicles are eligible for pre-booking
    pub fn is_electric(&self) -> bool {
        self.fuel_type == FuelType::Electric
    }
}

// ── Tests ──────────────────────────────────────────────────────
