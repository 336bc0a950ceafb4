//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use stats_backend::Trace;
#[cfg(debug_assertions)]
use stats_backend::doc::ApiDoc;
use stats_backend::inbound::http::configure_api;
use stats_backend::inbound::http::health::{HealthState, live, ready};
use stats_backend::inbound::http::state::HttpState;
use stats_backend::outbound::memory::InMemoryHitRepository;
use stats_backend::outbound::persistence::DieselHitRepository;

/// Build handler state over the configured hit store.
///
/// Uses PostgreSQL when a pool is configured, otherwise a process-local
/// store whose contents are lost on restart.
fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            info!(storage = "postgres", "hit store configured");
            HttpState::with_system_clock(Arc::new(DieselHitRepository::new(pool.clone())))
        }
        None => {
            warn!(
                storage = "memory",
                "no database configured; hits will not survive a restart"
            );
            HttpState::with_system_clock(Arc::new(InMemoryHitRepository::new()))
        }
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "stats server listening");
    health_state.mark_ready();
    Ok(server)
}
