//! Domain primitives, aggregates and services.
//!
//! Purpose: define the library's entities and the loan lifecycle rules
//! independently of transport and storage. Inbound adapters talk to the
//! driving ports in [`ports`]; outbound adapters implement its driven ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Book, Client, Employee, Category, Loan: entities and their drafts.
//! - LoanService and the reference-data services implementing the driving
//!   ports.

pub mod auth;
pub mod book;
pub mod catalogue_service;
pub mod category;
pub mod category_service;
pub mod client;
pub mod client_service;
pub mod employee;
pub mod employee_service;
pub mod error;
pub mod ids;
pub mod loan;
pub mod loan_service;
pub mod ports;
mod text;
pub mod trace_id;

pub use self::auth::{LoginCredentials, Password};
pub use self::book::{Book, BookDetails, BookDraft, BookFilter, BookValidationError};
pub use self::catalogue_service::CatalogueService;
pub use self::category::{Category, CategoryDraft, CategoryValidationError};
pub use self::category_service::CategoryService;
pub use self::client::{Client, ClientDraft, ClientValidationError, NationalId};
pub use self::client_service::ClientService;
pub use self::employee::{
    EmailAddress, Employee, EmployeeProfile, EmployeeValidationError, PasswordHash,
};
pub use self::employee_service::EmployeeService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{BookId, CategoryId, ClientId, EmployeeId, LoanId, RecordKey};
pub use self::loan::{
    LOAN_PERIOD_DAYS, Loan, LoanAmendment, LoanFilter, LoanRejection, LoanValidationError,
    MAX_OPEN_LOANS_PER_CLIENT,
};
pub use self::loan_service::LoanService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use library_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
