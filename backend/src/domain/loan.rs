//! Loans (checkouts) and the rules that reject them.
//!
//! A loan is *open* while `closed_at` is unset and *overdue* when it is open
//! and `due_at` lies before the instant of the query. Overdue is never
//! stored; [`Loan::is_overdue`] evaluates it on demand.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use serde_json::json;

use super::{BookId, ClientId, EmployeeId, Error, LoanId, RecordKey};

/// Length of a loan period.
pub const LOAN_PERIOD_DAYS: i64 = 14;
/// Maximum number of simultaneously open loans a client may hold.
pub const MAX_OPEN_LOANS_PER_CLIENT: usize = 3;

/// Fixed loan period as a [`TimeDelta`].
pub fn loan_period() -> TimeDelta {
    TimeDelta::days(LOAN_PERIOD_DAYS)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(skip)]
    key: Option<RecordKey>,
    id: LoanId,
    client_id: ClientId,
    book_id: BookId,
    employee_id: EmployeeId,
    opened_at: DateTime<Utc>,
    due_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
}

impl Loan {
    /// Start a loan at `now`, due one loan period later.
    pub fn open(
        client_id: ClientId,
        book_id: BookId,
        employee_id: EmployeeId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            key: None,
            id: LoanId::random(),
            client_id,
            book_id,
            employee_id,
            opened_at: now,
            due_at: now + loan_period(),
            closed_at: None,
        }
    }

    pub fn key(&self) -> Option<RecordKey> {
        self.key
    }

    pub fn id(&self) -> LoanId {
        self.id
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    /// Employee who opened the loan, or who closed it once returned.
    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn due_at(&self) -> DateTime<Utc> {
        self.due_at
    }

    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_open() && self.due_at < now
    }

    /// Copy of this loan with every mutable field overwritten.
    ///
    /// Identity and store key are preserved. Availability is not touched by
    /// amendments; callers see that asymmetry documented on the port.
    pub fn amended(&self, amendment: &LoanAmendment) -> Result<Self, LoanValidationError> {
        amendment.validate()?;
        Ok(Self {
            key: self.key,
            id: self.id,
            client_id: amendment.client_id,
            book_id: amendment.book_id,
            employee_id: amendment.employee_id,
            opened_at: amendment.opened_at,
            due_at: amendment.due_at,
            closed_at: amendment.closed_at,
        })
    }

    pub(crate) fn close(&mut self, employee_id: EmployeeId, at: DateTime<Utc>) {
        self.employee_id = employee_id;
        self.closed_at = Some(at);
    }

    pub(crate) fn assign_key(&mut self, key: RecordKey) {
        self.key = Some(key);
    }
}

/// Administrative overwrite of a loan's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanAmendment {
    pub client_id: ClientId,
    pub book_id: BookId,
    pub employee_id: EmployeeId,
    pub opened_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl LoanAmendment {
    fn validate(&self) -> Result<(), LoanValidationError> {
        if self.due_at < self.opened_at {
            return Err(LoanValidationError::DueBeforeOpen);
        }
        if self.closed_at.is_some_and(|closed| closed < self.opened_at) {
            return Err(LoanValidationError::ClosedBeforeOpen);
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanValidationError {
    DueBeforeOpen,
    ClosedBeforeOpen,
}

impl fmt::Display for LoanValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DueBeforeOpen => write!(f, "due date must not precede the open date"),
            Self::ClosedBeforeOpen => write!(f, "close date must not precede the open date"),
        }
    }
}

impl std::error::Error for LoanValidationError {}

/// Business-rule failures of the loan lifecycle, one per precondition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoanRejection {
    #[error("client {0} not found")]
    ClientNotFound(ClientId),
    #[error("book {0} is unavailable")]
    BookUnavailable(BookId),
    #[error("employee {0} is missing or inactive")]
    InactiveEmployee(EmployeeId),
    #[error("client {0} already has {MAX_OPEN_LOANS_PER_CLIENT} open loans")]
    LoanLimitReached(ClientId),
    #[error("book {0} is already borrowed")]
    BookAlreadyBorrowed(BookId),
    #[error("loan {0} not found")]
    LoanNotFound(LoanId),
    #[error("loan {0} has already been returned")]
    LoanAlreadyReturned(LoanId),
}

impl LoanRejection {
    /// Stable machine-readable reason code.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::ClientNotFound(_) => "client_not_found",
            Self::BookUnavailable(_) => "book_unavailable",
            Self::InactiveEmployee(_) => "inactive_employee",
            Self::LoanLimitReached(_) => "loan_limit_reached",
            Self::BookAlreadyBorrowed(_) => "book_already_borrowed",
            Self::LoanNotFound(_) => "loan_not_found",
            Self::LoanAlreadyReturned(_) => "loan_already_returned",
        }
    }
}

impl From<LoanRejection> for Error {
    fn from(rejection: LoanRejection) -> Self {
        let message = rejection.to_string();
        let details = json!({ "reason": rejection.reason() });
        let error = match rejection {
            LoanRejection::ClientNotFound(_) | LoanRejection::LoanNotFound(_) => {
                Error::not_found(message)
            }
            LoanRejection::LoanLimitReached(_) => Error::limit_exceeded(message),
            LoanRejection::BookUnavailable(_)
            | LoanRejection::InactiveEmployee(_)
            | LoanRejection::BookAlreadyBorrowed(_)
            | LoanRejection::LoanAlreadyReturned(_) => Error::invalid_state(message),
        };
        error.with_details(details)
    }
}

/// Scan criteria for loan listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanFilter {
    All,
    Open,
    /// Open loans whose due date precedes `as_of`.
    Overdue { as_of: DateTime<Utc> },
    ByClient(ClientId),
    ByEmployee(EmployeeId),
    ByBook(BookId),
}

impl LoanFilter {
    pub fn matches(&self, loan: &Loan) -> bool {
        match *self {
            Self::All => true,
            Self::Open => loan.is_open(),
            Self::Overdue { as_of } => loan.is_overdue(as_of),
            Self::ByClient(id) => loan.client_id() == id,
            Self::ByEmployee(id) => loan.employee_id() == id,
            Self::ByBook(id) => loan.book_id() == id,
        }
    }
}

#[cfg(test)]
#[path = "loan_tests.rs"]
mod tests;
