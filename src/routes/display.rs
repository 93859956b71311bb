//! List-card projection of stored routes.

use serde::Serialize;

use crate::config::FleetConfig;
use crate::constants::{LABEL_ACTIVE, LABEL_INACTIVE, LABEL_NO_BUS, LABEL_NO_DURATION};
use crate::entities::route;
use crate::fleet::BusType;
use crate::utils::datetime::{split_date_time, LocalizedDateTime};
use crate::utils::money::{amount_to_cents, format_price};

/// What a route card shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDisplay {
    pub id: String,
    pub title: String,
    pub departure: LocalizedDateTime,
    pub arrival: LocalizedDateTime,
    pub duration: String,
    pub price: String,
    pub active: bool,
    pub status_label: &'static str,
    pub bus_company: String,
    pub bus_type: BusType,
    pub bus_label: String,
    pub seats: u32,
}

impl RouteDisplay {
    pub fn from_model(model: &route::Model, fleet: &FleetConfig) -> Self {
        let active = model.is_active();
        let bus_type = model.bus_type();

        // Stored seat counts win; rows written without one fall back to the bus type.
        let seats = u32::try_from(model.available_seats)
            .ok()
            .filter(|seats| *seats > 0)
            .unwrap_or_else(|| fleet.capacity_for(bus_type));

        Self {
            id: model.id.clone(),
            title: format!("{} → {}", model.origin, model.destination),
            departure: split_date_time(&model.departure_datetime),
            arrival: split_date_time(&model.arrival_datetime),
            duration: model
                .duration
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| LABEL_NO_DURATION.to_string()),
            price: format_price(amount_to_cents(model.price)),
            active,
            status_label: if active { LABEL_ACTIVE } else { LABEL_INACTIVE },
            bus_company: model.bus_company.clone(),
            bus_type,
            bus_label: model.bus_id.clone().unwrap_or_else(|| LABEL_NO_BUS.to_string()),
            seats,
        }
    }

    /// One-line summary used by the CLI listing
    pub fn summary_line(&self) -> String {
        format!(
            "{}  {}  {} {} → {} {}  {}  {}  {} lugares  {}",
            self.id,
            self.title,
            self.departure.date,
            self.departure.time,
            self.arrival.date,
            self.arrival.time,
            self.duration,
            self.price,
            self.seats,
            self.status_label
        )
    }
}
