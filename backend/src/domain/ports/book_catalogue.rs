//! Driving port for the book catalogue and its category edges.

use async_trait::async_trait;

use crate::domain::{Book, BookDetails, BookDraft, BookFilter, BookId, Category, CategoryId, Error};

/// Request to catalogue a new book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBookRequest {
    pub draft: BookDraft,
    pub category_ids: Vec<CategoryId>,
}

/// Request to replace a book's metadata.
///
/// `category_ids` replaces the book's edge set when present and leaves it
/// alone when absent. There is no availability field to set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBookRequest {
    pub book_id: BookId,
    pub draft: BookDraft,
    pub category_ids: Option<Vec<CategoryId>>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookCatalogue: Send + Sync {
    async fn create_book(&self, request: CreateBookRequest) -> Result<BookDetails, Error>;

    async fn get_book(&self, book_id: BookId) -> Result<BookDetails, Error>;

    async fn list_books(&self, filter: BookFilter) -> Result<Vec<Book>, Error>;

    async fn update_book(&self, request: UpdateBookRequest) -> Result<BookDetails, Error>;

    /// Delete a book that is not on loan.
    async fn delete_book(&self, book_id: BookId) -> Result<(), Error>;

    /// Associate a book with a category. Idempotent.
    async fn attach_category(
        &self,
        book_id: BookId,
        category_id: CategoryId,
    ) -> Result<(), Error>;

    /// Dissociate a book from a category. Idempotent.
    async fn detach_category(
        &self,
        book_id: BookId,
        category_id: CategoryId,
    ) -> Result<(), Error>;

    async fn categories_of_book(&self, book_id: BookId) -> Result<Vec<Category>, Error>;

    async fn books_in_category(&self, category_id: CategoryId) -> Result<Vec<Book>, Error>;
}

/// Fixture catalogue that validates drafts and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookCatalogue;

fn book_not_found(book_id: BookId) -> Error {
    Error::not_found(format!("book {book_id} not found"))
}

#[async_trait]
impl BookCatalogue for FixtureBookCatalogue {
    async fn create_book(&self, request: CreateBookRequest) -> Result<BookDetails, Error> {
        let book =
            Book::new(request.draft).map_err(|err| Error::invalid_request(err.to_string()))?;
        Ok(BookDetails {
            book,
            category_ids: request.category_ids,
        })
    }

    async fn get_book(&self, book_id: BookId) -> Result<BookDetails, Error> {
        Err(book_not_found(book_id))
    }

    async fn list_books(&self, _filter: BookFilter) -> Result<Vec<Book>, Error> {
        Ok(Vec::new())
    }

    async fn update_book(&self, request: UpdateBookRequest) -> Result<BookDetails, Error> {
        Err(book_not_found(request.book_id))
    }

    async fn delete_book(&self, book_id: BookId) -> Result<(), Error> {
        Err(book_not_found(book_id))
    }

    async fn attach_category(
        &self,
        book_id: BookId,
        _category_id: CategoryId,
    ) -> Result<(), Error> {
        Err(book_not_found(book_id))
    }

    async fn detach_category(
        &self,
        book_id: BookId,
        _category_id: CategoryId,
    ) -> Result<(), Error> {
        Err(book_not_found(book_id))
    }

    async fn categories_of_book(&self, book_id: BookId) -> Result<Vec<Category>, Error> {
        Err(book_not_found(book_id))
    }

    async fn books_in_category(&self, _category_id: CategoryId) -> Result<Vec<Book>, Error> {
        Ok(Vec::new())
    }
}
