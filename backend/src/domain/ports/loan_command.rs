//! Driving port for loan lifecycle mutations.

use async_trait::async_trait;

use crate::domain::{BookId, ClientId, EmployeeId, Error, Loan, LoanAmendment, LoanId};

/// Request to lend a book to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenLoanRequest {
    pub client_id: ClientId,
    pub book_id: BookId,
    /// Active employee handling the checkout.
    pub employee_id: EmployeeId,
}

/// Request to record the return of a borrowed book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseLoanRequest {
    pub loan_id: LoanId,
    /// Active employee receiving the book; becomes the loan's employee.
    pub employee_id: EmployeeId,
}

/// Driving port for opening, closing and administering loans.
///
/// Failures of the lifecycle rules surface as [`Error`] values built from
/// [`LoanRejection`](crate::domain::LoanRejection), carrying a stable
/// `details.reason`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanCommand: Send + Sync {
    /// Open a loan due one loan period from now and mark the book unavailable.
    async fn open_loan(&self, request: OpenLoanRequest) -> Result<Loan, Error>;

    /// Close an open loan and mark its book available.
    async fn close_loan(&self, request: CloseLoanRequest) -> Result<Loan, Error>;

    /// Administrative overwrite of a loan's fields. Does not change book
    /// availability.
    async fn amend_loan(&self, loan_id: LoanId, amendment: LoanAmendment) -> Result<Loan, Error>;

    /// Remove a loan. Does not change book availability.
    async fn delete_loan(&self, loan_id: LoanId) -> Result<(), Error>;
}

/// Fixture command that opens loans without persisting them.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoanCommand;

#[async_trait]
impl LoanCommand for FixtureLoanCommand {
    async fn open_loan(&self, request: OpenLoanRequest) -> Result<Loan, Error> {
        Ok(Loan::open(
            request.client_id,
            request.book_id,
            request.employee_id,
            chrono::Utc::now(),
        ))
    }

    async fn close_loan(&self, request: CloseLoanRequest) -> Result<Loan, Error> {
        Err(Error::not_found(format!("loan {} not found", request.loan_id)))
    }

    async fn amend_loan(&self, loan_id: LoanId, _amendment: LoanAmendment) -> Result<Loan, Error> {
        Err(Error::not_found(format!("loan {loan_id} not found")))
    }

    async fn delete_loan(&self, loan_id: LoanId) -> Result<(), Error> {
        Err(Error::not_found(format!("loan {loan_id} not found")))
    }
}
