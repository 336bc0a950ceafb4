//! Hit ingestion HTTP handler.
//!
//! ```text
//! POST /hit
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::HitDraft;
use crate::domain::ports::RecordHitRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_timestamp};

/// Request payload describing one hit.
///
/// Every field is optional on the wire so that missing values surface as
/// field-level validation errors rather than opaque decode failures.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct HitRequestBody {
    /// Client-side identifier. Accepted and ignored; the store assigns ids.
    pub id: Option<i64>,
    #[schema(example = "ewm-main-service")]
    pub app: Option<String>,
    #[schema(example = "/events/1")]
    pub uri: Option<String>,
    #[schema(example = "192.163.0.1")]
    pub ip: Option<String>,
    /// Moment of the hit, `yyyy-MM-dd HH:mm:ss`.
    #[schema(example = "2022-09-06 11:00:23")]
    pub timestamp: Option<String>,
}

fn parse_hit_body(body: HitRequestBody) -> ApiResult<HitDraft> {
    let HitRequestBody {
        id: _,
        app,
        uri,
        ip,
        timestamp,
    } = body;
    Ok(HitDraft {
        app: app.unwrap_or_default(),
        uri: uri.unwrap_or_default(),
        ip: ip.unwrap_or_default(),
        timestamp: parse_optional_timestamp(timestamp.as_deref(), FieldName::new("timestamp"))?,
    })
}

/// Record that an endpoint of an application was requested.
///
/// # Examples
/// ```no_run
/// use actix_web::{HttpResponse, web};
/// use stats_backend::inbound::http::hits::{HitRequestBody, record_hit};
/// use stats_backend::inbound::http::{ApiResult, state::HttpState};
///
/// async fn call_handler(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
///     let payload = web::Json(HitRequestBody {
///         id: None,
///         app: Some("ewm-main-service".to_owned()),
///         uri: Some("/events/1".to_owned()),
///         ip: Some("192.163.0.1".to_owned()),
///         timestamp: Some("2022-09-06 11:00:23".to_owned()),
///     });
///     record_hit(state, payload).await
/// }
/// ```
#[utoipa::path(
    post,
    path = "/hit",
    request_body = HitRequestBody,
    responses(
        (status = 201, description = "Hit recorded"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Hit store unavailable", body = ErrorSchema)
    ),
    tags = ["hits"],
    operation_id = "recordHit"
)]
#[post("/hit")]
pub async fn record_hit(
    state: web::Data<HttpState>,
    payload: web::Json<HitRequestBody>,
) -> ApiResult<HttpResponse> {
    let hit = parse_hit_body(payload.into_inner())?;
    state.hits.record_hit(RecordHitRequest { hit }).await?;
    Ok(HttpResponse::Created().finish())
}

#[cfg(test)]
#[path = "hits_tests.rs"]
mod tests;
