//! Port for the book/category edge set.
//!
//! Adapters keep one set of `(book, category)` edges and answer both
//! directions from it, so the two sides can never disagree.

use async_trait::async_trait;

use crate::domain::{Book, BookId, Category, CategoryId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by category association adapters.
    pub enum CategoryAssociationError {
        Connection { message: String } => "association store connection failed: {message}",
        Query { message: String } => "association store query failed: {message}",
        BookMissing { book_id: BookId } => "book {book_id} not found",
        CategoryMissing { category_id: CategoryId } => "category {category_id} not found",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryAssociationRepository: Send + Sync {
    /// Add an edge. Adding an existing edge is a no-op.
    async fn add(
        &self,
        book_id: &BookId,
        category_id: &CategoryId,
    ) -> Result<(), CategoryAssociationError>;

    /// Remove an edge. Removing an absent edge is a no-op.
    async fn remove(
        &self,
        book_id: &BookId,
        category_id: &CategoryId,
    ) -> Result<(), CategoryAssociationError>;

    /// Replace the book's edges: removals first, then additions.
    async fn replace_for_book(
        &self,
        book_id: &BookId,
        category_ids: &[CategoryId],
    ) -> Result<(), CategoryAssociationError>;

    async fn categories_for_book(
        &self,
        book_id: &BookId,
    ) -> Result<Vec<Category>, CategoryAssociationError>;

    async fn books_for_category(
        &self,
        category_id: &CategoryId,
    ) -> Result<Vec<Book>, CategoryAssociationError>;
}

/// Fixture that accepts every edge and reports none.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCategoryAssociationRepository;

#[async_trait]
impl CategoryAssociationRepository for FixtureCategoryAssociationRepository {
    async fn add(
        &self,
        _book_id: &BookId,
        _category_id: &CategoryId,
    ) -> Result<(), CategoryAssociationError> {
        Ok(())
    }

    async fn remove(
        &self,
        _book_id: &BookId,
        _category_id: &CategoryId,
    ) -> Result<(), CategoryAssociationError> {
        Ok(())
    }

    async fn replace_for_book(
        &self,
        _book_id: &BookId,
        _category_ids: &[CategoryId],
    ) -> Result<(), CategoryAssociationError> {
        Ok(())
    }

    async fn categories_for_book(
        &self,
        _book_id: &BookId,
    ) -> Result<Vec<Category>, CategoryAssociationError> {
        Ok(Vec::new())
    }

    async fn books_for_category(
        &self,
        _category_id: &CategoryId,
    ) -> Result<Vec<Book>, CategoryAssociationError> {
        Ok(Vec::new())
    }
}
