//! Driving port for reading loans.

use async_trait::async_trait;

use crate::domain::{BookId, ClientId, EmployeeId, Error, Loan, LoanId};

/// Which loans to list. Overdue is evaluated at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoanListing {
    #[default]
    All,
    Open,
    Overdue,
    ByClient(ClientId),
    ByEmployee(EmployeeId),
    ByBook(BookId),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanQuery: Send + Sync {
    async fn get_loan(&self, loan_id: LoanId) -> Result<Loan, Error>;

    async fn list_loans(&self, listing: LoanListing) -> Result<Vec<Loan>, Error>;
}

/// Fixture query with no loans.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoanQuery;

#[async_trait]
impl LoanQuery for FixtureLoanQuery {
    async fn get_loan(&self, loan_id: LoanId) -> Result<Loan, Error> {
        Err(Error::not_found(format!("loan {loan_id} not found")))
    }

    async fn list_loans(&self, _listing: LoanListing) -> Result<Vec<Loan>, Error> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_lists_nothing() {
        let loans = FixtureLoanQuery
            .list_loans(LoanListing::Overdue)
            .await
            .expect("listing succeeds");
        assert!(loans.is_empty());
    }
}
