//! Port for book persistence.
//!
//! Adapters store book metadata and the book side of the category edge set.
//! They never accept an availability value from callers: inserts start
//! available and updates keep the stored flag.

use async_trait::async_trait;

use crate::domain::{Book, BookFilter, BookId, CategoryId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by book repository adapters.
    pub enum BookRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "book repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "book repository query failed: {message}",
        /// No book with the given identifier exists.
        Missing { book_id: BookId } => "book {book_id} not found",
        /// A referenced category does not exist.
        UnknownCategory { category_id: CategoryId } => "category {category_id} not found",
        /// The book is referenced by an open loan.
        OnLoan { book_id: BookId } => "book {book_id} is on loan",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Insert a new book together with its category edges.
    ///
    /// Either every edge is written with the book or nothing is.
    async fn insert(
        &self,
        book: &Book,
        category_ids: &[CategoryId],
    ) -> Result<Book, BookRepositoryError>;

    /// Overwrite title, author and publication year of an existing book.
    ///
    /// When `category_ids` is present the book's edge set is replaced in the
    /// same write.
    async fn update(
        &self,
        book: &Book,
        category_ids: Option<Vec<CategoryId>>,
    ) -> Result<Book, BookRepositoryError>;

    async fn find_by_id(&self, book_id: &BookId) -> Result<Option<Book>, BookRepositoryError>;

    /// Books matching `filter`, ordered by insertion.
    async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, BookRepositoryError>;

    /// Remove a book and its category edges.
    ///
    /// Fails with [`BookRepositoryError::OnLoan`] while an open loan
    /// references the book.
    async fn delete(&self, book_id: &BookId) -> Result<(), BookRepositoryError>;
}

/// Fixture implementation that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookRepository;

#[async_trait]
impl BookRepository for FixtureBookRepository {
    async fn insert(
        &self,
        book: &Book,
        _category_ids: &[CategoryId],
    ) -> Result<Book, BookRepositoryError> {
        Ok(book.clone())
    }

    async fn update(
        &self,
        book: &Book,
        _category_ids: Option<Vec<CategoryId>>,
    ) -> Result<Book, BookRepositoryError> {
        Err(BookRepositoryError::missing(book.id()))
    }

    async fn find_by_id(&self, _book_id: &BookId) -> Result<Option<Book>, BookRepositoryError> {
        Ok(None)
    }

    async fn list(&self, _filter: &BookFilter) -> Result<Vec<Book>, BookRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete(&self, book_id: &BookId) -> Result<(), BookRepositoryError> {
        Err(BookRepositoryError::missing(*book_id))
    }
}
