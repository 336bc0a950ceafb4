//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the hit ingestion, statistics, and health endpoints
//! together with the error schema wrappers from
//! [`crate::inbound::http::schemas`]. The document backs Swagger UI in debug
//! builds and is exported by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::hits::HitRequestBody;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::stats::ViewStatsBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hit statistics service API",
        description = "Records endpoint hits and reports aggregated view counts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::hits::record_hit,
        crate::inbound::http::stats::get_stats,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(HitRequestBody, ViewStatsBody, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "hits", description = "Hit ingestion"),
        (name = "stats", description = "Aggregated hit statistics"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
