use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait, Schema};
use std::path::Path;

use crate::entities::route;

/// Local SQLite database holding the `routes` table
pub struct LocalStorage {
    pub conn: DatabaseConnection,
}

impl LocalStorage {
    /// Open (or create) the database at `path`, or an in-memory one when `None`
    pub async fn new(path: Option<&Path>) -> Result<Self> {
        let database_url = match path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create database directory: {}", parent.display()))?;
                }
                format!("sqlite://{}?mode=rwc", path.display())
            }
            None => "sqlite::memory:".to_string(),
        };

        // A single pooled connection: an in-memory database lives and dies with it.
        let mut options = ConnectOptions::new(database_url.clone());
        options.min_connections(1).max_connections(1).sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .with_context(|| format!("Failed to open database: {}", database_url))?;

        let storage = LocalStorage { conn };
        storage.init_schema().await?;
        log::debug!("Opened route database at {}", database_url);

        Ok(storage)
    }

    /// Create tables from the entity definitions if they do not exist
    async fn init_schema(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        let mut routes = schema.create_table_from_entity(route::Entity);
        routes.if_not_exists();
        self.conn
            .execute(backend.build(&routes))
            .await
            .context("Failed to create routes table")?;

        Ok(())
    }

    /// Check if the database has any routes
    pub async fn has_data(&self) -> Result<bool> {
        Ok(route::Entity::find().count(&self.conn).await? > 0)
    }

    /// Clear all data from the database
    pub async fn clear_all_data(&self) -> Result<()> {
        route::Entity::delete_many().exec(&self.conn).await?;
        Ok(())
    }
}
