//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. When a
//! migration changes the `hits` table, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Append-only log of recorded hits.
    ///
    /// `id` is assigned by the database sequence and orders hits by arrival.
    hits (id) {
        /// Primary key from the `BIGSERIAL` sequence.
        id -> Int8,
        /// Service that registered the hit.
        app -> Text,
        /// Requested resource path, stored verbatim.
        uri -> Text,
        /// Visitor address, stored verbatim.
        ip -> Text,
        /// Wall-clock instant of the hit, without time zone.
        occurred_at -> Timestamp,
    }
}
