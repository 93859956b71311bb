//! Repository layer for database operations.
//!
//! Repositories encapsulate queries against the entities in [`crate::entities`],
//! following the Data Mapper pattern recommended by SeaORM. Every method is
//! generic over [`sea_orm::ConnectionTrait`] so it runs on a plain connection or
//! inside a transaction.

pub mod route;

pub use route::RouteRepository;
