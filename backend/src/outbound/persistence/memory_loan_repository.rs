//! In-memory [`LoanRepository`] adapter.
//!
//! `commit_open` and `commit_close` run their whole re-check and write
//! sequence under the store's write lock, which makes the loan row and the
//! book availability flag change together or not at all.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::ports::{LoanRepository, LoanRepositoryError};
use crate::domain::{BookId, ClientId, EmployeeId, Loan, LoanFilter, LoanId};

use super::InMemoryLibraryStore;
use super::memory_store::LibraryTables;

fn ensure_active_employee(
    tables: &LibraryTables,
    employee_id: &EmployeeId,
) -> Result<(), LoanRepositoryError> {
    match tables.employees.get(employee_id) {
        None => Err(LoanRepositoryError::employee_missing(*employee_id)),
        Some(employee) if !employee.is_active() => {
            Err(LoanRepositoryError::employee_inactive(*employee_id))
        }
        Some(_) => Ok(()),
    }
}

fn check_open_preconditions(
    tables: &LibraryTables,
    loan: &Loan,
    limit: usize,
) -> Result<(), LoanRepositoryError> {
    if !tables.clients.contains(&loan.client_id()) {
        return Err(LoanRepositoryError::client_missing(loan.client_id()));
    }
    let book = tables
        .books
        .get(&loan.book_id())
        .ok_or_else(|| LoanRepositoryError::book_missing(loan.book_id()))?;
    if !book.is_available() {
        return Err(LoanRepositoryError::book_unavailable(loan.book_id()));
    }
    ensure_active_employee(tables, &loan.employee_id())?;
    if tables.open_loan_count_for_client(&loan.client_id()) >= limit {
        return Err(LoanRepositoryError::loan_limit_reached(
            loan.client_id(),
            limit,
        ));
    }
    if tables.open_loan_for_book(&loan.book_id()).is_some() {
        return Err(LoanRepositoryError::book_already_borrowed(loan.book_id()));
    }
    Ok(())
}

fn check_amendment_references(
    tables: &LibraryTables,
    loan: &Loan,
) -> Result<(), LoanRepositoryError> {
    if !tables.clients.contains(&loan.client_id()) {
        return Err(LoanRepositoryError::client_missing(loan.client_id()));
    }
    if !tables.books.contains(&loan.book_id()) {
        return Err(LoanRepositoryError::book_missing(loan.book_id()));
    }
    if !tables.employees.contains(&loan.employee_id()) {
        return Err(LoanRepositoryError::employee_missing(loan.employee_id()));
    }
    if loan.is_open() {
        let clash = tables
            .open_loan_for_book(&loan.book_id())
            .is_some_and(|other| other.id() != loan.id());
        if clash {
            return Err(LoanRepositoryError::book_already_borrowed(loan.book_id()));
        }
    }
    Ok(())
}

#[async_trait]
impl LoanRepository for InMemoryLibraryStore {
    async fn find_by_id(&self, loan_id: &LoanId) -> Result<Option<Loan>, LoanRepositoryError> {
        self.read(LoanRepositoryError::query, |tables| {
            Ok(tables.loans.get(loan_id).cloned())
        })
    }

    async fn list(&self, filter: &LoanFilter) -> Result<Vec<Loan>, LoanRepositoryError> {
        self.read(LoanRepositoryError::query, |tables| {
            Ok(tables
                .loans
                .values()
                .filter(|loan| filter.matches(loan))
                .cloned()
                .collect())
        })
    }

    async fn count_open_for_client(
        &self,
        client_id: &ClientId,
    ) -> Result<usize, LoanRepositoryError> {
        self.read(LoanRepositoryError::query, |tables| {
            Ok(tables.open_loan_count_for_client(client_id))
        })
    }

    async fn find_open_for_book(
        &self,
        book_id: &BookId,
    ) -> Result<Option<Loan>, LoanRepositoryError> {
        self.read(LoanRepositoryError::query, |tables| {
            Ok(tables.open_loan_for_book(book_id).cloned())
        })
    }

    async fn commit_open(&self, loan: &Loan, limit: usize) -> Result<Loan, LoanRepositoryError> {
        self.write(LoanRepositoryError::query, |tables| {
            if let Err(err) = check_open_preconditions(tables, loan, limit) {
                debug!(loan_id = %loan.id(), error = %err, "loan commit refused");
                return Err(err);
            }
            let key = tables.allocate_key();
            let mut row = loan.clone();
            row.assign_key(key);
            tables.loans.insert(key, row.id(), row.clone());
            if let Some(book) = tables.books.get_mut(&row.book_id()) {
                book.mark_on_loan();
            }
            Ok(row)
        })
    }

    async fn commit_close(
        &self,
        loan_id: &LoanId,
        employee_id: &EmployeeId,
        closed_at: DateTime<Utc>,
    ) -> Result<Loan, LoanRepositoryError> {
        self.write(LoanRepositoryError::query, |tables| {
            let open = tables
                .loans
                .get(loan_id)
                .ok_or_else(|| LoanRepositoryError::missing(*loan_id))?
                .is_open();
            if !open {
                return Err(LoanRepositoryError::already_closed(*loan_id));
            }
            ensure_active_employee(tables, employee_id)?;

            let loan = tables
                .loans
                .get_mut(loan_id)
                .ok_or_else(|| LoanRepositoryError::missing(*loan_id))?;
            loan.close(*employee_id, closed_at);
            let closed = loan.clone();
            if let Some(book) = tables.books.get_mut(&closed.book_id()) {
                book.mark_returned();
            }
            Ok(closed)
        })
    }

    async fn amend(&self, loan: &Loan) -> Result<Loan, LoanRepositoryError> {
        self.write(LoanRepositoryError::query, |tables| {
            let key = tables
                .loans
                .key_of(&loan.id())
                .ok_or_else(|| LoanRepositoryError::missing(loan.id()))?;
            check_amendment_references(tables, loan)?;
            let mut row = loan.clone();
            row.assign_key(key);
            tables.loans.insert(key, row.id(), row.clone());
            Ok(row)
        })
    }

    async fn delete(&self, loan_id: &LoanId) -> Result<(), LoanRepositoryError> {
        self.write(LoanRepositoryError::query, |tables| {
            tables
                .loans
                .remove(loan_id)
                .map(|_| ())
                .ok_or_else(|| LoanRepositoryError::missing(*loan_id))
        })
    }
}

#[cfg(test)]
#[path = "memory_loan_repository_tests.rs"]
mod tests;
