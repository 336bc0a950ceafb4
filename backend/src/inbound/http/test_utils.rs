//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryHitRepository;

/// Build an app serving the hit API over `state`, wrapped in [`Trace`].
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure_api)
}

/// State over a fresh in-memory store, returning the store for inspection.
pub fn in_memory_state() -> (HttpState, Arc<InMemoryHitRepository>) {
    let repo = Arc::new(InMemoryHitRepository::new());
    (HttpState::with_system_clock(Arc::clone(&repo)), repo)
}
