//! Driven port for the append-only hit store.
//!
//! The store exposes exactly two operations: append one hit, and select the
//! hits inside a time window (optionally restricted to a URI set). There is
//! no update or delete path.

use async_trait::async_trait;

use crate::domain::{HitEvent, NewHit, TimeWindow, UriFilter};

use super::define_port_error;

define_port_error! {
    /// Errors raised by hit store adapters.
    pub enum HitRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "hit repository connection failed: {message}",
        /// Query or insert failed during execution.
        Query { message: String } =>
            "hit repository query failed: {message}",
    }
}

/// Port for durable hit persistence.
///
/// Implementations must make each append atomic: a concurrent
/// [`HitRepository::select_in_range`] sees either none or all of a hit.
/// A successful append is visible to every query issued afterwards.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HitRepository: Send + Sync {
    /// Persist a hit and return it with its assigned identifier.
    async fn append(&self, hit: &NewHit) -> Result<HitEvent, HitRepositoryError>;

    /// Load every hit whose timestamp lies in `window` and whose URI is
    /// accepted by `uris`, ordered by identifier.
    async fn select_in_range(
        &self,
        window: &TimeWindow,
        uris: &UriFilter,
    ) -> Result<Vec<HitEvent>, HitRepositoryError>;
}
