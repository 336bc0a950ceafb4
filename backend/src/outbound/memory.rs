//! In-memory implementation of the hit repository.
//!
//! Hits live in a `Vec` guarded by a `tokio::sync::RwLock`. The store is used
//! when no database URL is configured and by HTTP-level tests.
//!
//! - **Not durable**: all hits are lost on process restart.
//! - **Atomic appends**: identifier assignment and the push happen under one
//!   write lock, so readers observe either none or all of a hit.
//! - **Linear scans**: every query walks the full log.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{HitRepository, HitRepositoryError};
use crate::domain::{HitEvent, HitId, NewHit, TimeWindow, UriFilter};

#[derive(Debug, Default)]
struct HitLog {
    last_id: i64,
    hits: Vec<HitEvent>,
}

/// Process-local hit store.
#[derive(Debug, Default)]
pub struct InMemoryHitRepository {
    log: RwLock<HitLog>,
}

impl InMemoryHitRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of hits recorded so far.
    pub async fn len(&self) -> usize {
        self.log.read().await.hits.len()
    }

    /// Whether no hit has been recorded yet.
    pub async fn is_empty(&self) -> bool {
        self.log.read().await.hits.is_empty()
    }
}

#[async_trait]
impl HitRepository for InMemoryHitRepository {
    async fn append(&self, hit: &NewHit) -> Result<HitEvent, HitRepositoryError> {
        let mut log = self.log.write().await;
        let id = log
            .last_id
            .checked_add(1)
            .ok_or_else(|| HitRepositoryError::query("hit identifier space exhausted"))?;
        let event = hit.clone().into_event(HitId::new(id));
        log.last_id = id;
        log.hits.push(event.clone());
        Ok(event)
    }

    async fn select_in_range(
        &self,
        window: &TimeWindow,
        uris: &UriFilter,
    ) -> Result<Vec<HitEvent>, HitRepositoryError> {
        let log = self.log.read().await;
        Ok(log
            .hits
            .iter()
            .filter(|hit| window.contains(hit.timestamp) && uris.matches(&hit.uri))
            .cloned()
            .collect())
    }
}
