//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::hits;

/// Row struct for reading from the hits table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = hits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HitRow {
    pub id: i64,
    pub app: String,
    pub uri: String,
    pub ip: String,
    pub occurred_at: NaiveDateTime,
}

/// Insertable struct for appending hit records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = hits)]
pub(crate) struct NewHitRow<'a> {
    pub app: &'a str,
    pub uri: &'a str,
    pub ip: &'a str,
    pub occurred_at: NaiveDateTime,
}
