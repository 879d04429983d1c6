//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, UpdateResult,
};

use crate::domain::booking::{Booking, BookingRepository, BookingStatus, NewBooking};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::booking;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        user_id: m.user_id,
        vehicle_id: m.vehicle_id,
        location_id: m.location_id,
        latitude: m.latitude,
        longitude: m.longitude,
        current_charge: m.current_charge,
        eta_minutes: m.eta_minutes,
        status: BookingStatus::from_str(&m.status),
        lock_expires_at: m.lock_expires_at,
        created_at: m.created_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn insert(&self, new: NewBooking) -> DomainResult<Booking> {
        debug!(
            "Inserting booking: user={}, vehicle={}, location={}",
            new.user_id, new.vehicle_id, new.location_id
        );

        let model = booking::ActiveModel {
            id: Default::default(), // auto-increment
            user_id: Set(new.user_id),
            vehicle_id: Set(new.vehicle_id),
            location_id: Set(new.location_id),
            latitude: Set(new.latitude),
            longitude: Set(new.longitude),
            current_charge: Set(new.current_charge),
            eta_minutes: Set(new.eta_minutes),
            status: Set(BookingStatus::Pending.as_str().to_string()),
            lock_expires_at: Set(None),
            created_at: Set(Utc::now()),
        };

        let result = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(result))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_id_for_user(&self, id: i32, user_id: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .filter(booking::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, b: &Booking) -> DomainResult<()> {
        debug!("Updating booking: {}", b.id);

        let existing = booking::Entity::find_by_id(b.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: b.id.to_string(),
            });
        }

        let model = booking::ActiveModel {
            id: Set(b.id),
            user_id: Set(b.user_id.clone()),
            vehicle_id: Set(b.vehicle_id.clone()),
            location_id: Set(b.location_id.clone()),
            latitude: Set(b.latitude),
            longitude: Set(b.longitude),
            current_charge: Set(b.current_charge),
            eta_minutes: Set(b.eta_minutes),
            status: Set(b.status.as_str().to_string()),
            lock_expires_at: Set(b.lock_expires_at),
            created_at: Set(b.created_at),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_pending_for_location(&self, location_id: &str) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::LocationId.eq(location_id))
            .filter(booking::Column::Status.eq("pending"))
            .order_by_asc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_all_for_location(&self, location_id: &str) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::LocationId.eq(location_id))
            .order_by_asc(booking::Column::EtaMinutes)
            .order_by_asc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count_active_for_location(&self, location_id: &str) -> DomainResult<u64> {
        booking::Entity::find()
            .filter(booking::Column::LocationId.eq(location_id))
            .filter(booking::Column::Status.is_in(["pending", "locked"]))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_active_for_vehicle(
        &self,
        user_id: &str,
        vehicle_id: &str,
    ) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .filter(booking::Column::VehicleId.eq(vehicle_id))
            .filter(booking::Column::Status.is_in(["pending", "locked"]))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn active_vehicle_ids_for_user(&self, user_id: &str) -> DomainResult<Vec<String>> {
        let models = booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .filter(booking::Column::Status.is_in(["pending", "locked"]))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut ids: Vec<String> = models.into_iter().map(|m| m.vehicle_id).collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    async fn find_live_lock_for_location(
        &self,
        location_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find()
            .filter(booking::Column::LocationId.eq(location_id))
            .filter(booking::Column::Status.eq("locked"))
            .filter(booking::Column::LockExpiresAt.gt(now))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn expire_stale_locks(
        &self,
        location_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<u64> {
        debug!("Expiring stale locks: location={}", location_id);

        let result: UpdateResult = booking::Entity::update_many()
            .col_expr(
                booking::Column::Status,
                sea_orm::sea_query::Expr::value("expired"),
            )
            .col_expr(
                booking::Column::LockExpiresAt,
                sea_orm::sea_query::Expr::value(Option::<DateTime<Utc>>::None),
            )
            .filter(booking::Column::LocationId.eq(location_id))
            .filter(booking::Column::Status.eq("locked"))
            .filter(booking::Column::LockExpiresAt.lte(now))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected)
    }

    async fn locations_with_stale_locks(&self, now: DateTime<Utc>) -> DomainResult<Vec<String>> {
        let models = booking::Entity::find()
            .filter(booking::Column::Status.eq("locked"))
            .filter(booking::Column::LockExpiresAt.lte(now))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut locations: Vec<String> = models.into_iter().map(|m| m.location_id).collect();
        locations.sort();
        locations.dedup();
        Ok(locations)
    }
}
