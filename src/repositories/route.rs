//! Route repository for database operations.

use anyhow::Result;
use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::constants::{STATUS_ACTIVE, STATUS_INACTIVE};
use crate::entities::route;
use crate::routes::NewRoute;
use crate::utils::datetime::STORAGE_DATETIME_FORMAT;

/// Repository for route-related database operations.
pub struct RouteRepository;

impl RouteRepository {
    /// Get all routes ordered by departure.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<route::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(route::Entity::find()
            .order_by_asc(route::Column::DepartureDatetime)
            .all(conn)
            .await?)
    }

    /// Get routes departing at or after `now`, earliest first.
    pub async fn list_future<C>(conn: &C, now: NaiveDateTime) -> Result<Vec<route::Model>>
    where
        C: ConnectionTrait,
    {
        let now = now.format(STORAGE_DATETIME_FORMAT).to_string();
        Ok(route::Entity::departing_from(&now).all(conn).await?)
    }

    /// Get a single route by id.
    pub async fn get_by_id<C>(conn: &C, id: &str) -> Result<Option<route::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(route::Entity::find_by_id(id.to_string()).one(conn).await?)
    }

    /// Insert a new route with a fresh id.
    pub async fn create<C>(conn: &C, new_route: &NewRoute) -> Result<route::Model>
    where
        C: ConnectionTrait,
    {
        let mut model = route::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            ..Default::default()
        };
        apply_fields(&mut model, new_route);
        Ok(model.insert(conn).await?)
    }

    /// Overwrite an existing route. Returns `None` when the id is unknown.
    pub async fn update<C>(conn: &C, id: &str, new_route: &NewRoute) -> Result<Option<route::Model>>
    where
        C: ConnectionTrait,
    {
        let Some(existing) = Self::get_by_id(conn, id).await? else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        apply_fields(&mut model, new_route);
        Ok(Some(model.update(conn).await?))
    }

    /// Activate or deactivate a route. Returns `None` when the id is unknown.
    pub async fn set_status<C>(conn: &C, id: &str, active: bool) -> Result<Option<route::Model>>
    where
        C: ConnectionTrait,
    {
        let Some(existing) = Self::get_by_id(conn, id).await? else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        model.status = ActiveValue::Set(if active { STATUS_ACTIVE } else { STATUS_INACTIVE }.to_string());
        Ok(Some(model.update(conn).await?))
    }

    /// Delete a route. Returns whether a row was removed.
    pub async fn delete<C>(conn: &C, id: &str) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        let result = route::Entity::delete_by_id(id.to_string()).exec(conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Count all routes.
    pub async fn count<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(route::Entity::find().count(conn).await?)
    }

    /// Count active routes.
    pub async fn count_active<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(route::Entity::find()
            .filter(route::Column::Status.eq(STATUS_ACTIVE))
            .count(conn)
            .await?)
    }
}

fn apply_fields(model: &mut route::ActiveModel, new_route: &NewRoute) {
    model.origin = ActiveValue::Set(new_route.origin.clone());
    model.destination = ActiveValue::Set(new_route.destination.clone());
    model.departure_datetime = ActiveValue::Set(new_route.departure_datetime.clone());
    model.arrival_datetime = ActiveValue::Set(new_route.arrival_datetime.clone());
    model.departure_time = ActiveValue::Set(new_route.departure_time.clone());
    model.arrival_time = ActiveValue::Set(new_route.arrival_time.clone());
    model.duration = ActiveValue::Set(Some(new_route.duration.clone()).filter(|d| !d.is_empty()));
    model.duration_minutes = ActiveValue::Set(new_route.duration_minutes);
    model.price = ActiveValue::Set(new_route.price);
    model.bus_company = ActiveValue::Set(new_route.bus_company.clone());
    model.bus_type = ActiveValue::Set(new_route.bus_type.as_db_str().to_string());
    model.available_seats = ActiveValue::Set(i32::try_from(new_route.available_seats).unwrap_or(i32::MAX));
    model.status = ActiveValue::Set(new_route.status.clone());
    model.driver_id = ActiveValue::Set(new_route.driver_id.clone());
    model.second_driver_id = ActiveValue::Set(new_route.second_driver_id.clone());
    model.bus_id = ActiveValue::Set(new_route.bus_id.clone());
}
