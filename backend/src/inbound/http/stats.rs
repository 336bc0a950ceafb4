//! Hit statistics HTTP handler.
//!
//! ```text
//! GET /stats?start=2022-09-06%2011:00:23&end=2022-09-07%2011:00:23&uris=/events/1&unique=true
//! ```
//!
//! The query string is decoded by hand so `uris` may arrive either as one
//! comma-separated value or as repeated parameters.

use actix_web::{HttpRequest, get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::AggregateRow;
use crate::domain::ports::HitStatsRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_flag, parse_required_timestamp};

const START: FieldName = FieldName::new("start");
const END: FieldName = FieldName::new("end");
const UNIQUE: FieldName = FieldName::new("unique");

/// One aggregate row of the statistics response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ViewStatsBody {
    #[schema(example = "ewm-main-service")]
    pub app: String,
    #[schema(example = "/events/1")]
    pub uri: String,
    #[schema(example = 6)]
    pub hits: u64,
}

impl From<AggregateRow> for ViewStatsBody {
    fn from(row: AggregateRow) -> Self {
        Self {
            app: row.app,
            uri: row.uri,
            hits: row.hits,
        }
    }
}

/// Raw, percent-decoded statistics parameters.
#[derive(Debug, Default, PartialEq, Eq)]
struct StatsParams {
    start: Option<String>,
    end: Option<String>,
    uris: Vec<String>,
    unique: Option<String>,
}

impl StatsParams {
    fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "start" => params.start = Some(value.into_owned()),
                "end" => params.end = Some(value.into_owned()),
                "uris" => params
                    .uris
                    .extend(value.split(',').map(str::to_owned)),
                "unique" => params.unique = Some(value.into_owned()),
                _ => {}
            }
        }
        params
    }

    fn into_request(self) -> ApiResult<HitStatsRequest> {
        Ok(HitStatsRequest {
            start: parse_required_timestamp(self.start.as_deref(), START)?,
            end: parse_required_timestamp(self.end.as_deref(), END)?,
            uris: self.uris,
            unique: self
                .unique
                .as_deref()
                .filter(|raw| !raw.is_empty())
                .map(|raw| parse_flag(raw, UNIQUE))
                .transpose()?
                .unwrap_or(false),
        })
    }
}

/// Count hits per `(app, uri)` within an inclusive time window.
///
/// Rows are ordered by `hits` descending, then `app` and `uri` ascending.
#[utoipa::path(
    get,
    path = "/stats",
    params(
        ("start" = String, Query, description = "Window start, yyyy-MM-dd HH:mm:ss", example = "2022-09-06 11:00:23"),
        ("end" = String, Query, description = "Window end, yyyy-MM-dd HH:mm:ss", example = "2022-09-07 11:00:23"),
        ("uris" = Option<Vec<String>>, Query, description = "URIs to include; comma-separated or repeated"),
        ("unique" = Option<bool>, Query, description = "Count distinct visitor addresses; empty means false")
    ),
    responses(
        (status = 200, description = "Aggregated hit counts", body = [ViewStatsBody]),
        (status = 400, description = "Invalid parameters or range", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Hit store unavailable", body = ErrorSchema)
    ),
    tags = ["stats"],
    operation_id = "getStats"
)]
#[get("/stats")]
pub async fn get_stats(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<Vec<ViewStatsBody>>> {
    let request = StatsParams::from_query(req.query_string()).into_request()?;
    let response = state.stats.stats(request).await?;
    Ok(web::Json(
        response.rows.into_iter().map(ViewStatsBody::from).collect(),
    ))
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
