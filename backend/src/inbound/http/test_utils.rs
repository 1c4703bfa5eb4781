//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::{App, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::FixtureCredentialHasher;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{configure_api, configure_extractors};
use crate::outbound::persistence::InMemoryLibraryStore;

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 2026-03-02T09:00:00Z, the instant every test app runs at.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid fixed instant")
}

/// Real services over an empty in-memory store.
pub fn library_state() -> HttpState {
    HttpState::from_store(
        Arc::new(InMemoryLibraryStore::new()),
        Arc::new(FixtureCredentialHasher),
        Arc::new(FixedClock(test_now())),
    )
}

/// App exposing every `/api/v1` route over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure_extractors)
        .service(web::scope("/api/v1").configure(configure_api))
}
