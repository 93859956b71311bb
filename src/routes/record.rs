//! Payload written to the `routes` table on create and update.

use serde::{Deserialize, Serialize};

use crate::fleet::BusType;

/// A validated route ready to be persisted.
///
/// Produced by [`RouteForm::to_new_route`](super::RouteForm::to_new_route); fields
/// mirror the backend column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRoute {
    pub origin: String,
    pub destination: String,
    pub departure_datetime: String,
    pub arrival_datetime: String,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub duration: String,
    pub duration_minutes: i64,
    pub price: f64,
    pub bus_company: String,
    pub bus_type: BusType,
    pub available_seats: u32,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_driver_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus_id: Option<String>,
}
