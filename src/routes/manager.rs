//! Route management workflows: save, list, toggle and delete.

use chrono::{Duration, NaiveDateTime};

use crate::config::Config;
use crate::constants::{SUCCESS_ROUTE_CREATED, SUCCESS_ROUTE_DELETED, SUCCESS_ROUTE_STATUS, SUCCESS_ROUTE_UPDATED};
use crate::entities::route;
use crate::repositories::RouteRepository;
use crate::storage::LocalStorage;
use crate::utils::datetime::to_safe_date_at;

use super::{FormMode, RouteDisplay, RouteForm, RouteFormError};

/// Errors surfaced by [`RouteManager`].
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error(transparent)]
    Invalid(#[from] RouteFormError),

    #[error("Rota não encontrada: {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Route totals for the summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteCounts {
    pub total: u64,
    pub active: u64,
}

/// Glues the route form to the repository.
pub struct RouteManager {
    storage: LocalStorage,
    config: Config,
}

impl RouteManager {
    pub fn new(storage: LocalStorage, config: Config) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    /// Empty form with configured defaults
    pub fn new_form(&self) -> RouteForm {
        RouteForm::new(&self.config.fleet)
    }

    /// Form prefilled from a stored route
    pub async fn edit_form(&self, id: &str) -> Result<RouteForm, RouteError> {
        let model = self.find(id).await?;
        Ok(RouteForm::from_route(&model))
    }

    /// Validate the form and create a route, or update `editing_id` when given.
    pub async fn save(
        &self,
        form: &RouteForm,
        editing_id: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<route::Model, RouteError> {
        let mode = match editing_id {
            Some(id) => FormMode::Edit {
                existing_bus_id: self.find(id).await?.bus_id,
            },
            None => FormMode::Create,
        };

        let record = form.to_new_route(&mode, &self.config, now).inspect_err(|e| {
            log::warn!("Route form rejected: {}", e);
        })?;

        let saved = match editing_id {
            Some(id) => RouteRepository::update(&self.storage.conn, id, &record)
                .await?
                .ok_or_else(|| RouteError::NotFound(id.to_string()))?,
            None => RouteRepository::create(&self.storage.conn, &record).await?,
        };

        log::info!(
            "{}: {} ({} → {}, {})",
            if editing_id.is_some() { SUCCESS_ROUTE_UPDATED } else { SUCCESS_ROUTE_CREATED },
            saved.id,
            saved.origin,
            saved.destination,
            saved.departure_datetime
        );
        Ok(saved)
    }

    /// Routes still ahead of `now`, as route cards.
    ///
    /// The query compares storage strings, so it starts a day early: a legacy
    /// row written with an offset can carry a wall-clock date behind the local
    /// one. Rows whose departure does not resolve to an instant after `now` are
    /// dropped afterwards.
    pub async fn list_upcoming(&self, now: NaiveDateTime) -> Result<Vec<RouteDisplay>, RouteError> {
        let routes = RouteRepository::list_future(&self.storage.conn, now - Duration::days(1)).await?;
        let total = routes.len();

        let displays: Vec<RouteDisplay> = routes
            .iter()
            .filter(|route| to_safe_date_at(&route.departure_datetime, now).is_some_and(|dt| dt > now))
            .map(|route| RouteDisplay::from_model(route, &self.config.fleet))
            .collect();

        log::debug!("Listed {} upcoming routes ({} fetched)", displays.len(), total);
        Ok(displays)
    }

    /// Flip a route between active and inactive
    pub async fn toggle_status(&self, id: &str) -> Result<route::Model, RouteError> {
        let current = self.find(id).await?;
        let updated = RouteRepository::set_status(&self.storage.conn, id, !current.is_active())
            .await?
            .ok_or_else(|| RouteError::NotFound(id.to_string()))?;

        log::info!("{}: {} -> {}", SUCCESS_ROUTE_STATUS, id, updated.status);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), RouteError> {
        if !RouteRepository::delete(&self.storage.conn, id).await? {
            return Err(RouteError::NotFound(id.to_string()));
        }
        log::info!("{}: {}", SUCCESS_ROUTE_DELETED, id);
        Ok(())
    }

    pub async fn counts(&self) -> Result<RouteCounts, RouteError> {
        Ok(RouteCounts {
            total: RouteRepository::count(&self.storage.conn).await?,
            active: RouteRepository::count_active(&self.storage.conn).await?,
        })
    }

    async fn find(&self, id: &str) -> Result<route::Model, RouteError> {
        RouteRepository::get_by_id(&self.storage.conn, id)
            .await?
            .ok_or_else(|| RouteError::NotFound(id.to_string()))
    }
}
