//! Driving port for recording hits.
//!
//! Inbound adapters call this port once per observed request to a producer
//! application.

use async_trait::async_trait;

use crate::domain::{Error, HitDraft, HitEvent};

/// Request to record one hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHitRequest {
    pub hit: HitDraft,
}

/// Response carrying the stored hit with its assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHitResponse {
    pub hit: HitEvent,
}

/// Driving port for hit ingestion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HitCommand: Send + Sync {
    /// Validate and durably append a hit.
    ///
    /// Fails with [`crate::domain::ErrorCode::InvalidRequest`] naming the
    /// offending field when the draft is incomplete; nothing is written in
    /// that case.
    async fn record_hit(&self, request: RecordHitRequest) -> Result<RecordHitResponse, Error>;
}
