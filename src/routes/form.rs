//! Add/edit route form state and submission rules.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::{Config, FleetConfig};
use crate::constants::STATUS_ACTIVE;
use crate::entities::route;
use crate::fleet::BusType;
use crate::utils::datetime::{
    apply_date_mask, apply_time_mask, compose_date_time, compute_duration_label_at, compute_duration_minutes_at,
    parse_date_time_at, split_date_time, to_storage_date_time_at, validate_date_field, validate_time_field,
    YearRange, LEGACY_TIME_FORMAT,
};
use crate::utils::money::{amount_to_cents, apply_price_mask, cents_to_amount, format_price_value, parse_price};

use super::NewRoute;

/// First rule a form breaks; `Display` is the message shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteFormError {
    #[error("Por favor, informe a cidade de origem")]
    MissingOrigin,
    #[error("Por favor, informe a cidade de destino")]
    MissingDestination,
    #[error("Por favor, informe data e hora de partida")]
    MissingDeparture,
    #[error("Por favor, informe data e hora de chegada")]
    MissingArrival,
    #[error("Data de partida inválida (use DD/MM/AAAA)")]
    InvalidDepartureDate,
    #[error("Hora de partida inválida (use HH:MM)")]
    InvalidDepartureTime,
    #[error("Data de chegada inválida (use DD/MM/AAAA)")]
    InvalidArrivalDate,
    #[error("Hora de chegada inválida (use HH:MM)")]
    InvalidArrivalTime,
    #[error("A chegada deve ser posterior à partida")]
    ArrivalNotAfterDeparture,
    #[error("Por favor, informe o preço da passagem")]
    MissingPrice,
    #[error("Preço inválido")]
    InvalidPrice,
    #[error("Por favor, informe a empresa do ônibus")]
    MissingCompany,
    #[error("Por favor, selecione um motorista")]
    MissingDriver,
    #[error("O segundo motorista não pode ser o mesmo que o primeiro")]
    SameSecondDriver,
    #[error("Por favor, selecione um ônibus")]
    MissingBus,
}

/// Whether the form creates a route or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing keeps the stored bus when none is picked.
    Edit { existing_bus_id: Option<String> },
}

impl FormMode {
    pub fn is_create(&self) -> bool {
        matches!(self, Self::Create)
    }
}

/// Outcome of a successful [`RouteForm::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedRoute {
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    pub price_cents: i64,
}

/// Raw text of the add/edit route form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteForm {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub departure_time: String,
    pub arrival_date: String,
    pub arrival_time: String,
    pub price: String,
    pub bus_company: String,
    pub bus_type: String,
    pub driver_id: String,
    pub second_driver_id: String,
    pub bus_id: String,
}

impl Default for RouteForm {
    fn default() -> Self {
        Self::new(&FleetConfig::default())
    }
}

impl RouteForm {
    /// Empty form with the configured company preselected
    pub fn new(fleet: &FleetConfig) -> Self {
        Self {
            origin: String::new(),
            destination: String::new(),
            departure_date: String::new(),
            departure_time: String::new(),
            arrival_date: String::new(),
            arrival_time: String::new(),
            price: String::new(),
            bus_company: fleet.default_company.clone(),
            bus_type: BusType::default().as_db_str().to_string(),
            driver_id: String::new(),
            second_driver_id: String::new(),
            bus_id: String::new(),
        }
    }

    /// Prefill the form from a stored route
    pub fn from_route(model: &route::Model) -> Self {
        let departure = split_date_time(&model.departure_datetime);
        let arrival = split_date_time(&model.arrival_datetime);

        Self {
            origin: model.origin.clone(),
            destination: model.destination.clone(),
            departure_date: departure.date,
            departure_time: departure.time,
            arrival_date: arrival.date,
            arrival_time: arrival.time,
            price: format_price_value(amount_to_cents(model.price)),
            bus_company: model.bus_company.clone(),
            bus_type: model.bus_type().as_db_str().to_string(),
            driver_id: model.driver_id.clone().unwrap_or_default(),
            second_driver_id: model.second_driver_id.clone().unwrap_or_default(),
            bus_id: model.bus_id.clone().unwrap_or_default(),
        }
    }

    pub fn set_departure_date(&mut self, input: &str) {
        self.departure_date = apply_date_mask(input);
    }

    pub fn set_departure_time(&mut self, input: &str) {
        self.departure_time = apply_time_mask(input);
    }

    pub fn set_arrival_date(&mut self, input: &str) {
        self.arrival_date = apply_date_mask(input);
    }

    pub fn set_arrival_time(&mut self, input: &str) {
        self.arrival_time = apply_time_mask(input);
    }

    pub fn set_price(&mut self, input: &str) {
        self.price = apply_price_mask(input);
    }

    /// Picking the first driver clears a second driver that now duplicates it
    pub fn set_driver(&mut self, driver_id: &str) {
        self.driver_id = driver_id.to_string();
        if !self.second_driver_id.is_empty() && self.second_driver_id == self.driver_id {
            self.second_driver_id.clear();
        }
    }

    /// Apply a change to a named field, masking the same way the setters do.
    ///
    /// Returns `false` for an unknown field name.
    pub fn set_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "origin" => self.origin = value.to_string(),
            "destination" => self.destination = value.to_string(),
            "departure_date" => self.set_departure_date(value),
            "departure_time" => self.set_departure_time(value),
            "arrival_date" => self.set_arrival_date(value),
            "arrival_time" => self.set_arrival_time(value),
            "price" => self.set_price(value),
            "bus_company" => self.bus_company = value.to_string(),
            "bus_type" => self.bus_type = BusType::normalize(value).as_db_str().to_string(),
            "driver_id" => self.set_driver(value),
            "second_driver_id" => self.second_driver_id = value.to_string(),
            "bus_id" => self.bus_id = value.to_string(),
            _ => return false,
        }
        true
    }

    pub fn departure_combined(&self) -> String {
        compose_date_time(&self.departure_date, &self.departure_time)
    }

    pub fn arrival_combined(&self) -> String {
        compose_date_time(&self.arrival_date, &self.arrival_time)
    }

    /// Read-only duration field, empty until both ends form a valid trip
    pub fn duration_preview(&self, now: NaiveDateTime) -> String {
        compute_duration_label_at(&self.departure_combined(), &self.arrival_combined(), now)
    }

    /// True when the operator typed anything worth confirming before discarding
    pub fn has_data(&self) -> bool {
        [
            &self.origin,
            &self.destination,
            &self.departure_date,
            &self.departure_time,
            &self.arrival_date,
            &self.arrival_time,
            &self.price,
        ]
        .iter()
        .any(|field| !field.trim().is_empty())
    }

    /// Check the form in display order, stopping at the first broken rule.
    pub fn validate(
        &self,
        mode: &FormMode,
        years: &YearRange,
        now: NaiveDateTime,
    ) -> Result<ValidatedRoute, RouteFormError> {
        if self.origin.trim().is_empty() {
            return Err(RouteFormError::MissingOrigin);
        }
        if self.destination.trim().is_empty() {
            return Err(RouteFormError::MissingDestination);
        }
        if self.departure_combined().is_empty() {
            return Err(RouteFormError::MissingDeparture);
        }
        if self.arrival_combined().is_empty() {
            return Err(RouteFormError::MissingArrival);
        }

        if !validate_date_field(self.departure_date.trim(), years) {
            return Err(RouteFormError::InvalidDepartureDate);
        }
        if !validate_time_field(self.departure_time.trim()) {
            return Err(RouteFormError::InvalidDepartureTime);
        }
        if !validate_date_field(self.arrival_date.trim(), years) {
            return Err(RouteFormError::InvalidArrivalDate);
        }
        if !validate_time_field(self.arrival_time.trim()) {
            return Err(RouteFormError::InvalidArrivalTime);
        }

        // Field ranges pass for 31/02; the calendar check happens here.
        let departure =
            parse_date_time_at(&self.departure_combined(), now).ok_or(RouteFormError::InvalidDepartureDate)?;
        let arrival = parse_date_time_at(&self.arrival_combined(), now).ok_or(RouteFormError::InvalidArrivalDate)?;
        if arrival <= departure {
            return Err(RouteFormError::ArrivalNotAfterDeparture);
        }

        if self.price.trim().is_empty() {
            return Err(RouteFormError::MissingPrice);
        }
        let price_cents = match parse_price(&self.price) {
            Some(cents) if cents > 0 => cents,
            _ => return Err(RouteFormError::InvalidPrice),
        };

        if self.bus_company.trim().is_empty() {
            return Err(RouteFormError::MissingCompany);
        }
        if mode.is_create() && self.driver_id.trim().is_empty() {
            return Err(RouteFormError::MissingDriver);
        }
        if !self.second_driver_id.trim().is_empty() && self.second_driver_id.trim() == self.driver_id.trim() {
            return Err(RouteFormError::SameSecondDriver);
        }
        if mode.is_create() && self.bus_id.trim().is_empty() {
            return Err(RouteFormError::MissingBus);
        }

        Ok(ValidatedRoute {
            departure,
            arrival,
            price_cents,
        })
    }

    /// Validate and build the record sent to the `routes` table.
    pub fn to_new_route(&self, mode: &FormMode, config: &Config, now: NaiveDateTime) -> Result<NewRoute, RouteFormError> {
        let validated = self.validate(mode, &config.schedule.years(), now)?;

        let departure = self.departure_combined();
        let arrival = self.arrival_combined();
        let bus_type = BusType::normalize(&self.bus_type);

        let bus_id = match (non_empty(&self.bus_id), mode) {
            (Some(id), _) => Some(id),
            (None, FormMode::Edit { existing_bus_id }) => existing_bus_id.clone(),
            (None, FormMode::Create) => None,
        };

        Ok(NewRoute {
            origin: self.origin.trim().to_string(),
            destination: self.destination.trim().to_string(),
            departure_datetime: to_storage_date_time_at(&departure, now),
            arrival_datetime: to_storage_date_time_at(&arrival, now),
            departure_time: Some(validated.departure.format(LEGACY_TIME_FORMAT).to_string()),
            arrival_time: Some(validated.arrival.format(LEGACY_TIME_FORMAT).to_string()),
            duration: compute_duration_label_at(&departure, &arrival, now),
            duration_minutes: compute_duration_minutes_at(&departure, &arrival, now),
            price: cents_to_amount(validated.price_cents),
            bus_company: self.bus_company.trim().to_string(),
            bus_type,
            available_seats: config.fleet.capacity_for(bus_type),
            status: STATUS_ACTIVE.to_string(),
            driver_id: non_empty(&self.driver_id),
            second_driver_id: non_empty(&self.second_driver_id),
            bus_id,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
