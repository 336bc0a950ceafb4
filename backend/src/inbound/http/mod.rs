//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod hits;
pub mod schemas;
pub mod state;
pub mod stats;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register the hit and statistics endpoints, the JSON body config, and the
/// JSON 404 fallback.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use stats_backend::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(hits::record_hit)
        .service(stats::get_stats)
        .default_service(web::to(error::route_not_found));
}
