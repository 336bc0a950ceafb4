//! Hit statistics service library.
//!
//! Records endpoint hits and answers aggregate view-count queries. The crate
//! is split into `domain` (types, ports, services), `inbound` (HTTP
//! adapters), and `outbound` (storage adapters).

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
