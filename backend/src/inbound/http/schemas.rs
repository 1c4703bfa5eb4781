//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
#![expect(
    dead_code,
    reason = "Schema mirrors are only read by utoipa during OpenAPI generation"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A uniqueness constraint would be violated.
    #[schema(rename = "conflict")]
    Conflict,
    /// The entity is not in a state that allows the operation.
    #[schema(rename = "invalid_state")]
    InvalidState,
    /// The client already holds the maximum number of open loans.
    #[schema(rename = "limit_exceeded")]
    LimitExceeded,
    /// The entity is still referenced and cannot be removed.
    #[schema(rename = "dependency_violation")]
    DependencyViolation,
    /// A backing dependency is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "limit_exceeded")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "client already has 3 open loans")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    trace_id: Option<String>,
    /// Supplementary details such as `reason` or the offending `field`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Book`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Book)]
#[schema(rename_all = "camelCase")]
pub struct BookSchema {
    #[schema(format = "uuid")]
    id: String,
    #[schema(example = "Dom Casmurro")]
    title: String,
    #[schema(example = "Machado de Assis")]
    author: String,
    publication_year: Option<i32>,
    /// True while no open loan references the book. Read-only.
    available: bool,
}

/// Book with the identifiers of its categories.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct BookDetailsSchema {
    #[schema(format = "uuid")]
    id: String,
    title: String,
    author: String,
    publication_year: Option<i32>,
    available: bool,
    #[schema(value_type = Vec<uuid::Uuid>)]
    category_ids: Vec<String>,
}

/// OpenAPI schema for [`crate::domain::Category`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Category)]
pub struct CategorySchema {
    #[schema(format = "uuid")]
    id: String,
    #[schema(example = "Romance")]
    name: String,
    description: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Client`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Client)]
#[schema(rename_all = "camelCase")]
pub struct ClientSchema {
    #[schema(format = "uuid")]
    id: String,
    name: String,
    #[schema(example = "12345678901")]
    national_id: String,
    phone: Option<String>,
    address: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Employee`]. The password hash is never
/// exposed.
#[derive(ToSchema)]
#[schema(as = crate::domain::Employee)]
pub struct EmployeeSchema {
    #[schema(format = "uuid")]
    id: String,
    name: String,
    #[schema(format = "email")]
    email: String,
    active: bool,
}

/// OpenAPI schema for [`crate::domain::Loan`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Loan)]
#[schema(rename_all = "camelCase")]
pub struct LoanSchema {
    #[schema(format = "uuid")]
    id: String,
    #[schema(format = "uuid")]
    client_id: String,
    #[schema(format = "uuid")]
    book_id: String,
    /// Employee who opened the loan, or who closed it once returned.
    #[schema(format = "uuid")]
    employee_id: String,
    #[schema(format = "date-time")]
    opened_at: String,
    #[schema(format = "date-time")]
    due_at: String,
    #[schema(format = "date-time")]
    closed_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    #[test]
    fn error_code_schema_lists_every_code() {
        let schema = serde_json::to_value(ErrorCodeSchema::schema()).expect("schema serialises");
        let values = schema["enum"].as_array().expect("enum values");
        assert_eq!(values.len(), 9);
        assert!(values.iter().any(|v| v == "dependency_violation"));
    }
}
