//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Provides the durable [`HitRepository`](crate::domain::ports::HitRepository)
//! backed by PostgreSQL via Diesel with async support through `diesel-async`
//! and `bb8` connection pooling.
//!
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   internal to this module.
//! - Database errors are mapped to the port's connection/query variants.
//!
//! # Example
//!
//! ```ignore
//! use stats_backend::outbound::persistence::{DbPool, DieselHitRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/stats")).await?;
//! let repo = DieselHitRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_hit_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_hit_repository::DieselHitRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
