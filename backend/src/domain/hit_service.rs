//! Hit recording and statistics services.
//!
//! [`HitRecordingService`] is the only write path into the hit store.
//! [`HitStatsService`] is stateless: every call validates its window, reads
//! the matching hits and aggregates them with [`aggregate_hits`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::ports::{
    HitCommand, HitRepository, HitRepositoryError, HitStatsQuery, HitStatsRequest,
    HitStatsResponse, RecordHitRequest, RecordHitResponse,
};
use crate::domain::{
    CountingMode, Error, HitValidationError, NewHit, StatsCriteria, TIMESTAMP_FORMAT, TimeWindow,
    TimeWindowError, UriFilter, aggregate_hits,
};

fn map_repository_error(error: HitRepositoryError) -> Error {
    match error {
        HitRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("hit repository unavailable: {message}"))
        }
        HitRepositoryError::Query { message } => {
            error!(%message, "hit repository query failed");
            Error::internal(format!("hit repository error: {message}"))
        }
    }
}

fn map_validation_error(error: HitValidationError) -> Error {
    let code = match error {
        HitValidationError::Blank { .. } => "blank_field",
        HitValidationError::MissingTimestamp => "missing_field",
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field().as_str(),
        "code": code,
    }))
}

fn map_window_error(error: TimeWindowError, request: &HitStatsRequest) -> Error {
    Error::invalid_request(format!("invalid statistics range: {error}")).with_details(json!({
        "code": "invalid_range",
        "start": request.start.format(TIMESTAMP_FORMAT).to_string(),
        "end": request.end.format(TIMESTAMP_FORMAT).to_string(),
    }))
}

/// Hit service implementing the ingestion driving port.
#[derive(Clone)]
pub struct HitRecordingService<R> {
    hit_repo: Arc<R>,
}

impl<R> HitRecordingService<R> {
    /// Create a new recording service over the hit repository.
    pub fn new(hit_repo: Arc<R>) -> Self {
        Self { hit_repo }
    }
}

#[async_trait]
impl<R> HitCommand for HitRecordingService<R>
where
    R: HitRepository,
{
    async fn record_hit(&self, request: RecordHitRequest) -> Result<RecordHitResponse, Error> {
        let hit = NewHit::new(request.hit).map_err(map_validation_error)?;
        let stored = self
            .hit_repo
            .append(&hit)
            .await
            .map_err(map_repository_error)?;

        info!(
            id = %stored.id,
            app = %stored.app,
            uri = %stored.uri,
            "hit recorded"
        );
        Ok(RecordHitResponse { hit: stored })
    }
}

/// Hit service implementing the statistics driving port.
#[derive(Clone)]
pub struct HitStatsService<R> {
    hit_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> HitStatsService<R> {
    /// Create a new statistics service. `clock` supplies the instant used to
    /// reject windows that start in the future.
    pub fn new(hit_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { hit_repo, clock }
    }
}

#[async_trait]
impl<R> HitStatsQuery for HitStatsService<R>
where
    R: HitRepository,
{
    async fn stats(&self, request: HitStatsRequest) -> Result<HitStatsResponse, Error> {
        let now = self.clock.local().naive_local();
        let window = TimeWindow::new(request.start, request.end, now)
            .map_err(|err| map_window_error(err, &request))?;
        let criteria = StatsCriteria {
            window,
            uris: UriFilter::from_entries(request.uris),
            mode: CountingMode::from_unique_flag(request.unique),
        };

        let hits = self
            .hit_repo
            .select_in_range(&criteria.window, &criteria.uris)
            .await
            .map_err(map_repository_error)?;
        let rows = aggregate_hits(&hits, &criteria);

        debug!(
            selected = hits.len(),
            rows = rows.len(),
            mode = ?criteria.mode,
            "hit statistics computed"
        );
        Ok(HitStatsResponse { rows })
    }
}

#[cfg(test)]
#[path = "hit_service_tests.rs"]
mod tests;
