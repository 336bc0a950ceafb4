//! Domain primitives, services, and ports.
//!
//! Purpose: define the hit fact, the aggregation engine, and the ports that
//! connect them to storage and transport adapters. Types here are transport
//! agnostic; HTTP and database concerns live in `inbound` and `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic failure payload.
//! - HitDraft / NewHit / HitEvent — hit input, validated hit, stored hit.
//! - TimeWindow / UriFilter / StatsCriteria — query selection.
//! - aggregate_hits — the grouping-and-counting algorithm.
//! - HitRecordingService / HitStatsService — driving port implementations.

pub mod error;
pub mod hit;
pub mod hit_service;
pub mod ports;
pub mod stats;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::hit::{
    HitDraft, HitEvent, HitField, HitId, HitValidationError, NewHit, TIMESTAMP_FORMAT,
};
pub use self::hit_service::{HitRecordingService, HitStatsService};
pub use self::stats::{
    AggregateRow, CountingMode, StatsCriteria, TimeWindow, TimeWindowError, UriFilter,
    aggregate_hits,
};
pub use self::trace_id::TraceId;

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
