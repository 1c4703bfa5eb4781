//! Loan lifecycle service.
//!
//! Implements [`LoanCommand`] and [`LoanQuery`]. Preconditions are checked
//! in a fixed order so callers get the first applicable rejection, then the
//! repository's atomic commit re-checks them against the state it writes.
//! A request that loses a race therefore gets the same rejection it would
//! have seen had it arrived second.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info};

use crate::domain::ports::{
    BookRepository, BookRepositoryError, ClientRepository, ClientRepositoryError,
    CloseLoanRequest, EmployeeRepository, EmployeeRepositoryError, LoanCommand, LoanListing,
    LoanQuery, LoanRepository, LoanRepositoryError, OpenLoanRequest,
};
use crate::domain::{
    EmployeeId, Error, Loan, LoanAmendment, LoanFilter, LoanId, LoanRejection,
    MAX_OPEN_LOANS_PER_CLIENT,
};

/// Loan lifecycle manager over the loan, book, client and employee stores.
#[derive(Clone)]
pub struct LoanService<L, B, C, E> {
    loans: Arc<L>,
    books: Arc<B>,
    clients: Arc<C>,
    employees: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<L, B, C, E> LoanService<L, B, C, E> {
    pub fn new(
        loans: Arc<L>,
        books: Arc<B>,
        clients: Arc<C>,
        employees: Arc<E>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            loans,
            books,
            clients,
            employees,
            clock,
        }
    }
}

fn reject(rejection: LoanRejection) -> Error {
    debug!(reason = rejection.reason(), %rejection, "loan request rejected");
    Error::from(rejection)
}

fn store_failure(store: &str, message: String, unavailable: bool) -> Error {
    error!(store, %message, "repository failure during loan operation");
    if unavailable {
        Error::service_unavailable(format!("{store} repository unavailable"))
    } else {
        Error::internal(format!("{store} repository error: {message}"))
    }
}

fn map_book_error(error: BookRepositoryError) -> Error {
    match error {
        BookRepositoryError::Connection { message } => store_failure("book", message, true),
        other => store_failure("book", other.to_string(), false),
    }
}

fn map_client_error(error: ClientRepositoryError) -> Error {
    match error {
        ClientRepositoryError::Connection { message } => store_failure("client", message, true),
        other => store_failure("client", other.to_string(), false),
    }
}

fn map_employee_error(error: EmployeeRepositoryError) -> Error {
    match error {
        EmployeeRepositoryError::Connection { message } => {
            store_failure("employee", message, true)
        }
        other => store_failure("employee", other.to_string(), false),
    }
}

/// Map a failed lifecycle commit onto the rejection the caller would have
/// received from the equivalent pre-check.
fn map_commit_error(error: LoanRepositoryError) -> Error {
    match error {
        LoanRepositoryError::Connection { message } => store_failure("loan", message, true),
        LoanRepositoryError::Query { message } => store_failure("loan", message, false),
        LoanRepositoryError::Missing { loan_id } => reject(LoanRejection::LoanNotFound(loan_id)),
        LoanRepositoryError::ClientMissing { client_id } => {
            reject(LoanRejection::ClientNotFound(client_id))
        }
        LoanRepositoryError::BookMissing { book_id }
        | LoanRepositoryError::BookUnavailable { book_id } => {
            reject(LoanRejection::BookUnavailable(book_id))
        }
        LoanRepositoryError::EmployeeMissing { employee_id }
        | LoanRepositoryError::EmployeeInactive { employee_id } => {
            reject(LoanRejection::InactiveEmployee(employee_id))
        }
        LoanRepositoryError::LoanLimitReached { client_id, .. } => {
            reject(LoanRejection::LoanLimitReached(client_id))
        }
        LoanRepositoryError::BookAlreadyBorrowed { book_id } => {
            reject(LoanRejection::BookAlreadyBorrowed(book_id))
        }
        LoanRepositoryError::AlreadyClosed { loan_id } => {
            reject(LoanRejection::LoanAlreadyReturned(loan_id))
        }
    }
}

/// Amendments are administrative: missing references are plain not-found
/// errors and a second open loan on a book is a conflict.
fn map_amend_error(error: LoanRepositoryError) -> Error {
    match error {
        LoanRepositoryError::ClientMissing { client_id } => {
            Error::not_found(format!("client {client_id} not found"))
        }
        LoanRepositoryError::BookMissing { book_id } => {
            Error::not_found(format!("book {book_id} not found"))
        }
        LoanRepositoryError::EmployeeMissing { employee_id } => {
            Error::not_found(format!("employee {employee_id} not found"))
        }
        LoanRepositoryError::BookAlreadyBorrowed { book_id } => {
            Error::conflict(format!("book {book_id} already has an open loan"))
                .with_details(serde_json::json!({ "reason": "book_already_borrowed" }))
        }
        other => map_commit_error(other),
    }
}

impl<L, B, C, E> LoanService<L, B, C, E>
where
    L: LoanRepository,
    B: BookRepository,
    C: ClientRepository,
    E: EmployeeRepository,
{
    async fn ensure_active_employee(&self, employee_id: &EmployeeId) -> Result<(), Error> {
        let employee = self
            .employees
            .find_by_id(employee_id)
            .await
            .map_err(map_employee_error)?;
        match employee {
            Some(employee) if employee.is_active() => Ok(()),
            _ => Err(reject(LoanRejection::InactiveEmployee(*employee_id))),
        }
    }

    async fn find_loan(&self, loan_id: LoanId) -> Result<Loan, Error> {
        self.loans
            .find_by_id(&loan_id)
            .await
            .map_err(map_commit_error)?
            .ok_or_else(|| reject(LoanRejection::LoanNotFound(loan_id)))
    }
}

#[async_trait]
impl<L, B, C, E> LoanCommand for LoanService<L, B, C, E>
where
    L: LoanRepository,
    B: BookRepository,
    C: ClientRepository,
    E: EmployeeRepository,
{
    async fn open_loan(&self, request: OpenLoanRequest) -> Result<Loan, Error> {
        let OpenLoanRequest {
            client_id,
            book_id,
            employee_id,
        } = request;

        if self
            .clients
            .find_by_id(&client_id)
            .await
            .map_err(map_client_error)?
            .is_none()
        {
            return Err(reject(LoanRejection::ClientNotFound(client_id)));
        }

        let book = self
            .books
            .find_by_id(&book_id)
            .await
            .map_err(map_book_error)?;
        if !book.is_some_and(|book| book.is_available()) {
            return Err(reject(LoanRejection::BookUnavailable(book_id)));
        }

        self.ensure_active_employee(&employee_id).await?;

        let open_count = self
            .loans
            .count_open_for_client(&client_id)
            .await
            .map_err(map_commit_error)?;
        if open_count >= MAX_OPEN_LOANS_PER_CLIENT {
            return Err(reject(LoanRejection::LoanLimitReached(client_id)));
        }

        if self
            .loans
            .find_open_for_book(&book_id)
            .await
            .map_err(map_commit_error)?
            .is_some()
        {
            return Err(reject(LoanRejection::BookAlreadyBorrowed(book_id)));
        }

        let loan = Loan::open(client_id, book_id, employee_id, self.clock.utc());
        let stored = self
            .loans
            .commit_open(&loan, MAX_OPEN_LOANS_PER_CLIENT)
            .await
            .map_err(map_commit_error)?;

        info!(
            loan_id = %stored.id(),
            %client_id,
            %book_id,
            due_at = %stored.due_at(),
            "loan opened"
        );
        Ok(stored)
    }

    async fn close_loan(&self, request: CloseLoanRequest) -> Result<Loan, Error> {
        let CloseLoanRequest {
            loan_id,
            employee_id,
        } = request;

        let loan = self.find_loan(loan_id).await?;
        if !loan.is_open() {
            return Err(reject(LoanRejection::LoanAlreadyReturned(loan_id)));
        }
        self.ensure_active_employee(&employee_id).await?;

        let closed = self
            .loans
            .commit_close(&loan_id, &employee_id, self.clock.utc())
            .await
            .map_err(map_commit_error)?;

        info!(
            %loan_id,
            book_id = %closed.book_id(),
            %employee_id,
            "loan closed"
        );
        Ok(closed)
    }

    async fn amend_loan(&self, loan_id: LoanId, amendment: LoanAmendment) -> Result<Loan, Error> {
        let current = self.find_loan(loan_id).await?;
        let amended = current
            .amended(&amendment)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let stored = self
            .loans
            .amend(&amended)
            .await
            .map_err(map_amend_error)?;
        info!(%loan_id, "loan amended");
        Ok(stored)
    }

    async fn delete_loan(&self, loan_id: LoanId) -> Result<(), Error> {
        self.loans
            .delete(&loan_id)
            .await
            .map_err(map_commit_error)?;
        info!(%loan_id, "loan deleted");
        Ok(())
    }
}

#[async_trait]
impl<L, B, C, E> LoanQuery for LoanService<L, B, C, E>
where
    L: LoanRepository,
    B: BookRepository,
    C: ClientRepository,
    E: EmployeeRepository,
{
    async fn get_loan(&self, loan_id: LoanId) -> Result<Loan, Error> {
        self.find_loan(loan_id).await
    }

    async fn list_loans(&self, listing: LoanListing) -> Result<Vec<Loan>, Error> {
        let filter = match listing {
            LoanListing::All => LoanFilter::All,
            LoanListing::Open => LoanFilter::Open,
            LoanListing::Overdue => LoanFilter::Overdue {
                as_of: self.clock.utc(),
            },
            LoanListing::ByClient(id) => LoanFilter::ByClient(id),
            LoanListing::ByEmployee(id) => LoanFilter::ByEmployee(id),
            LoanListing::ByBook(id) => LoanFilter::ByBook(id),
        };
        self.loans.list(&filter).await.map_err(map_commit_error)
    }
}

#[cfg(test)]
#[path = "loan_service_tests.rs"]
mod tests;
