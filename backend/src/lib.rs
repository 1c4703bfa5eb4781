//! Library management backend.
//!
//! Hexagonal layout: `domain` holds entities, services and ports;
//! `outbound` implements the driven ports; `inbound::http` exposes the
//! driving ports over REST.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::{TRACE_ID_HEADER, TraceId};
pub use middleware::Trace;
