//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod hit_command;
mod hit_repository;
mod hit_stats_query;

#[cfg(test)]
pub use hit_command::MockHitCommand;
pub use hit_command::{HitCommand, RecordHitRequest, RecordHitResponse};
#[cfg(test)]
pub use hit_repository::MockHitRepository;
pub use hit_repository::{HitRepository, HitRepositoryError};
#[cfg(test)]
pub use hit_stats_query::MockHitStatsQuery;
pub use hit_stats_query::{HitStatsQuery, HitStatsRequest, HitStatsResponse};
