//! AG TUR route administration
//!
//! Back-office tooling for the AG TUR bus-ticketing console, focused on route
//! management: typed schedule input is masked, validated and converted into the
//! storage representation, trip durations are derived, and routes are kept in a
//! local SQLite table.
//!
//! # Modules
//!
//! * [`utils`] - Date/time composition and price helpers used by the route form
//! * [`routes`] - Route form, records, list cards and management workflows
//! * [`fleet`] - Bus types and their display names
//! * [`config`] - Application configuration management
//! * [`storage`] - Local database setup

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Bus types and seat capacity lookup
pub mod fleet;

/// Logging setup for the `log` facade
pub mod logger;

/// Repository layer for database operations
pub mod repositories;

/// Route form, records and management workflows
pub mod routes;

/// Local storage for route data
pub mod storage;

/// Utility functions for date/time handling and prices
pub mod utils;

pub use entities::route;
