//! PostgreSQL-backed `HitRepository` implementation using Diesel ORM.
//!
//! Appends are single-row inserts, so each hit becomes visible atomically.
//! Range selection pushes the window and URI predicates into SQL and returns
//! rows in identifier order; grouping happens in the domain.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{HitRepository, HitRepositoryError};
use crate::domain::{HitEvent, HitId, NewHit, TimeWindow, UriFilter};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{HitRow, NewHitRow};
use super::pool::{DbPool, PoolError};
use super::schema::hits;

/// Diesel-backed implementation of the hit repository port.
#[derive(Clone)]
pub struct DieselHitRepository {
    pool: DbPool,
}

impl DieselHitRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> HitRepositoryError {
    map_basic_pool_error(error, HitRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> HitRepositoryError {
    map_basic_diesel_error(
        error,
        HitRepositoryError::query,
        HitRepositoryError::connection,
    )
}

fn row_to_event(row: HitRow) -> HitEvent {
    let HitRow {
        id,
        app,
        uri,
        ip,
        occurred_at,
    } = row;
    HitEvent {
        id: HitId::new(id),
        app,
        uri,
        ip,
        timestamp: occurred_at,
    }
}

fn new_row(hit: &NewHit) -> NewHitRow<'_> {
    NewHitRow {
        app: hit.app(),
        uri: hit.uri(),
        ip: hit.ip(),
        occurred_at: hit.timestamp(),
    }
}

#[async_trait]
impl HitRepository for DieselHitRepository {
    async fn append(&self, hit: &NewHit) -> Result<HitEvent, HitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(hits::table)
            .values(&new_row(hit))
            .returning(HitRow::as_returning())
            .get_result::<HitRow>(&mut conn)
            .await
            .map(row_to_event)
            .map_err(map_diesel_error)
    }

    async fn select_in_range(
        &self,
        window: &TimeWindow,
        uris: &UriFilter,
    ) -> Result<Vec<HitEvent>, HitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = hits::table
            .filter(hits::occurred_at.between(window.start(), window.end()))
            .order(hits::id.asc())
            .select(HitRow::as_select())
            .into_boxed();
        if !uris.is_unrestricted() {
            let wanted: Vec<String> = uris.uris().map(str::to_owned).collect();
            query = query.filter(hits::uri.eq_any(wanted));
        }

        let rows: Vec<HitRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_event).collect())
    }
}
