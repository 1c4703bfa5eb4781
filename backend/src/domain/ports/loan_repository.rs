//! Port for loan persistence and the combined loan/availability commits.
//!
//! The two commit operations are the only writers of a book's availability
//! flag. Each one re-checks its preconditions and applies the loan write and
//! the flag flip as a single atomic step, so concurrent callers cannot both
//! pass a stale pre-check. Amend and delete never touch availability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{BookId, ClientId, EmployeeId, Loan, LoanFilter, LoanId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by loan repository adapters.
    pub enum LoanRepositoryError {
        Connection { message: String } => "loan repository connection failed: {message}",
        Query { message: String } => "loan repository query failed: {message}",
        Missing { loan_id: LoanId } => "loan {loan_id} not found",
        ClientMissing { client_id: ClientId } => "client {client_id} not found",
        BookMissing { book_id: BookId } => "book {book_id} not found",
        BookUnavailable { book_id: BookId } => "book {book_id} is unavailable",
        EmployeeMissing { employee_id: EmployeeId } => "employee {employee_id} not found",
        EmployeeInactive { employee_id: EmployeeId } => "employee {employee_id} is inactive",
        LoanLimitReached { client_id: ClientId, limit: usize } =>
            "client {client_id} already has {limit} open loans",
        BookAlreadyBorrowed { book_id: BookId } => "book {book_id} already has an open loan",
        AlreadyClosed { loan_id: LoanId } => "loan {loan_id} is already closed",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanRepository: Send + Sync {
    async fn find_by_id(&self, loan_id: &LoanId) -> Result<Option<Loan>, LoanRepositoryError>;

    /// Loans matching `filter`, ordered by insertion.
    async fn list(&self, filter: &LoanFilter) -> Result<Vec<Loan>, LoanRepositoryError>;

    async fn count_open_for_client(
        &self,
        client_id: &ClientId,
    ) -> Result<usize, LoanRepositoryError>;

    async fn find_open_for_book(
        &self,
        book_id: &BookId,
    ) -> Result<Option<Loan>, LoanRepositoryError>;

    /// Atomically insert an open loan and mark its book unavailable.
    ///
    /// Checks, in order: client exists, book exists, book available,
    /// employee exists and is active, client holds fewer than `limit` open
    /// loans, no open loan references the book. The first failing check is
    /// returned and nothing is written.
    async fn commit_open(&self, loan: &Loan, limit: usize) -> Result<Loan, LoanRepositoryError>;

    /// Atomically close a loan, reassign it to `employee_id` and mark its
    /// book available again.
    async fn commit_close(
        &self,
        loan_id: &LoanId,
        employee_id: &EmployeeId,
        closed_at: DateTime<Utc>,
    ) -> Result<Loan, LoanRepositoryError>;

    /// Overwrite a loan's mutable fields.
    ///
    /// Referenced records must exist and an open loan may not share its book
    /// with another open loan. Availability is left untouched.
    async fn amend(&self, loan: &Loan) -> Result<Loan, LoanRepositoryError>;

    /// Remove a loan unconditionally. Availability is left untouched.
    async fn delete(&self, loan_id: &LoanId) -> Result<(), LoanRepositoryError>;
}

/// Fixture that holds no loans and rejects every commit as a missing client.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoanRepository;

#[async_trait]
impl LoanRepository for FixtureLoanRepository {
    async fn find_by_id(&self, _loan_id: &LoanId) -> Result<Option<Loan>, LoanRepositoryError> {
        Ok(None)
    }

    async fn list(&self, _filter: &LoanFilter) -> Result<Vec<Loan>, LoanRepositoryError> {
        Ok(Vec::new())
    }

    async fn count_open_for_client(
        &self,
        _client_id: &ClientId,
    ) -> Result<usize, LoanRepositoryError> {
        Ok(0)
    }

    async fn find_open_for_book(
        &self,
        _book_id: &BookId,
    ) -> Result<Option<Loan>, LoanRepositoryError> {
        Ok(None)
    }

    async fn commit_open(&self, loan: &Loan, _limit: usize) -> Result<Loan, LoanRepositoryError> {
        Err(LoanRepositoryError::client_missing(loan.client_id()))
    }

    async fn commit_close(
        &self,
        loan_id: &LoanId,
        _employee_id: &EmployeeId,
        _closed_at: DateTime<Utc>,
    ) -> Result<Loan, LoanRepositoryError> {
        Err(LoanRepositoryError::missing(*loan_id))
    }

    async fn amend(&self, loan: &Loan) -> Result<Loan, LoanRepositoryError> {
        Err(LoanRepositoryError::missing(loan.id()))
    }

    async fn delete(&self, loan_id: &LoanId) -> Result<(), LoanRepositoryError> {
        Err(LoanRepositoryError::missing(*loan_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn limit_error_reports_the_limit() {
        let client_id = ClientId::random();
        let err = LoanRepositoryError::loan_limit_reached(client_id, 3_usize);
        assert_eq!(
            err.to_string(),
            format!("client {client_id} already has 3 open loans")
        );
    }

    #[tokio::test]
    async fn fixture_rejects_commits() {
        let repo = FixtureLoanRepository;
        let loan = Loan::open(
            ClientId::random(),
            BookId::random(),
            EmployeeId::random(),
            Utc::now(),
        );
        let err = repo.commit_open(&loan, 3).await.expect_err("no clients");
        assert!(matches!(err, LoanRepositoryError::ClientMissing { .. }));
    }
}
