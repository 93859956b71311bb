//! Local storage module for route persistence
//!
//! Opens the SQLite connection and creates the schema; queries live in
//! [`crate::repositories`].

pub mod db;

pub use db::LocalStorage;
