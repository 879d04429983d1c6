//! SeaORM implementation of VehicleRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::vehicle::{FuelType, Vehicle, VehicleRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::vehicle;

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_fuel_to_domain(fuel: vehicle::FuelType) -> FuelType {
    match fuel {
        vehicle::FuelType::Petrol => FuelType::Petrol,
        vehicle::FuelType::Diesel => FuelType::Diesel,
        vehicle::FuelType::Electric => FuelType::Electric,
    }
}

fn domain_fuel_to_entity(fuel: FuelType) -> vehicle::FuelType {
    match fuel {
        FuelType::Petrol => vehicle::FuelType::Petrol,
        FuelType::Diesel => vehicle::FuelType::Diesel,
        FuelType::Electric => vehicle::FuelType::Electric,
    }
}

fn model_to_domain(m: vehicle::Model) -> Vehicle {
    Vehicle {
        id: m.id,
        user_id: m.user_id,
        registration_number: m.registration_number,
        make: m.make,
        fuel_type: entity_fuel_to_domain(m.fuel_type),
        latitude: m.latitude,
        longitude: m.longitude,
        ideal_mileage: m.ideal_mileage,
        created_at: m.created_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

// ── VehicleRepository impl ──────────────────────────────────────

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn save(&self, v: Vehicle) -> DomainResult<()> {
        debug!("Saving vehicle: {}", v.id);

        let registration = v.registration_number.clone();
        let model = vehicle::ActiveModel {
            id: Set(v.id),
            user_id: Set(v.user_id),
            registration_number: Set(v.registration_number),
            make: Set(v.make),
            fuel_type: Set(domain_fuel_to_entity(v.fuel_type)),
            latitude: Set(v.latitude),
            longitude: Set(v.longitude),
            ideal_mileage: Set(v.ideal_mileage),
            created_at: Set(v.created_at),
        };
        model.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
                DomainError::Conflict(format!(
                    "vehicle with registration number {}",
                    registration
                ))
            } else {
                db_err(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_id_for_user(&self, id: &str, user_id: &str) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find_by_id(id)
            .filter(vehicle::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, v: &Vehicle) -> DomainResult<()> {
        debug!("Updating vehicle: {}", v.id);

        let existing = vehicle::Entity::find_by_id(&v.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: v.id.clone(),
            });
        }

        let model = vehicle::ActiveModel {
            id: Set(v.id.clone()),
            user_id: Set(v.user_id.clone()),
            registration_number: Set(v.registration_number.clone()),
            make: Set(v.make.clone()),
            fuel_type: Set(domain_fuel_to_entity(v.fuel_type)),
            latitude: Set(v.latitude),
            longitude: Set(v.longitude),
            ideal_mileage: Set(v.ideal_mileage),
            created_at: Set(v.created_at),
        };
        model.update(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
                DomainError::Conflict(format!(
                    "vehicle with registration number {}",
                    v.registration_number
                ))
            } else {
                db_err(e)
            }
        })?;

        Ok(())
    }

    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<Vehicle>> {
        let models = vehicle::Entity::find()
            .filter(vehicle::Column::UserId.eq(user_id))
            .order_by_asc(vehicle::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_electric_for_user(&self, user_id: &str) -> DomainResult<Vec<Vehicle>> {
        let models = vehicle::Entity::find()
            .filter(vehicle::Column::UserId.eq(user_id))
            .filter(vehicle::Column::FuelType.eq(vehicle::FuelType::Electric))
            .order_by_asc(vehicle::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
