use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Select};
use serde::{Deserialize, Serialize};

use crate::constants::STATUS_ACTIVE;
use crate::fleet::BusType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "routes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub origin: String,
    pub destination: String,
    /// `YYYY-MM-DD HH:MM`, local time
    pub departure_datetime: String,
    pub arrival_datetime: String,
    /// Legacy `HH:MM:SS` columns still read by older clients
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub duration: Option<String>,
    pub duration_minutes: i64,
    pub price: f64,
    pub bus_company: String,
    pub bus_type: String,
    pub available_seats: i32,
    pub status: String,
    pub driver_id: Option<String>,
    pub second_driver_id: Option<String>,
    pub bus_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }

    pub fn bus_type(&self) -> BusType {
        BusType::normalize(&self.bus_type)
    }
}

impl Entity {
    /// Routes departing at or after `now` (storage format), earliest first
    pub fn departing_from(now: &str) -> Select<Entity> {
        Self::find()
            .filter(Column::DepartureDatetime.gte(now))
            .order_by_asc(Column::DepartureDatetime)
    }
}
