//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the driving ports and remain testable without I/O.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{HitCommand, HitRepository, HitStatsQuery};
use crate::domain::{HitRecordingService, HitStatsService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub hits: Arc<dyn HitCommand>,
    pub stats: Arc<dyn HitStatsQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(hits: Arc<dyn HitCommand>, stats: Arc<dyn HitStatsQuery>) -> Self {
        Self { hits, stats }
    }

    /// Wire both services over one shared hit repository.
    pub fn from_repository<R>(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self
    where
        R: HitRepository + 'static,
    {
        Self {
            hits: Arc::new(HitRecordingService::new(Arc::clone(&repo))),
            stats: Arc::new(HitStatsService::new(repo, clock)),
        }
    }

    /// Wire both services using the system clock.
    pub fn with_system_clock<R>(repo: Arc<R>) -> Self
    where
        R: HitRepository + 'static,
    {
        Self::from_repository(repo, Arc::new(DefaultClock))
    }
}
