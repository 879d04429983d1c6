//! Vehicle entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vehicle fuel type
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum FuelType {
    #[sea_orm(string_value = "Petrol")]
    Petrol,
    #[sea_orm(string_value = "Diesel")]
    Diesel,
    #[sea_orm(string_value = "Electric")]
    Electric,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    #[sea_orm(unique)]
    pub registration_number: String,
    pub make: String,
    pub fuel_type: FuelType,
    pub latitude: f64,
    pub longitude: f64,
    pub ideal_mileage: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
