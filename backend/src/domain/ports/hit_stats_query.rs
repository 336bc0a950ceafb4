//! Driving port for aggregate hit statistics.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::domain::{AggregateRow, Error};

/// Raw statistics query as received from a consumer.
///
/// `uris` may contain blank entries; they are dropped before matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitStatsRequest {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub uris: Vec<String>,
    pub unique: bool,
}

/// Aggregated rows sorted by `hits` descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitStatsResponse {
    pub rows: Vec<AggregateRow>,
}

/// Driving port for statistics reads. Never mutates the hit store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HitStatsQuery: Send + Sync {
    /// Count hits per `(app, uri)` inside the requested window.
    async fn stats(&self, request: HitStatsRequest) -> Result<HitStatsResponse, Error>;
}
