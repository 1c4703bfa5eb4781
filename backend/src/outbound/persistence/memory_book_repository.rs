//! In-memory [`BookRepository`] adapter.

use async_trait::async_trait;

use crate::domain::ports::{BookRepository, BookRepositoryError};
use crate::domain::{Book, BookFilter, BookId, CategoryId};

use super::InMemoryLibraryStore;

#[async_trait]
impl BookRepository for InMemoryLibraryStore {
    async fn insert(
        &self,
        book: &Book,
        category_ids: &[CategoryId],
    ) -> Result<Book, BookRepositoryError> {
        self.write(BookRepositoryError::query, |tables| {
            if let Some(category_id) = tables.first_unknown_category(category_ids) {
                return Err(BookRepositoryError::unknown_category(category_id));
            }
            let key = tables.allocate_key();
            let mut row = book.clone();
            row.assign_key(key);
            tables.books.insert(key, row.id(), row.clone());
            tables.replace_edges(row.id(), category_ids);
            Ok(row)
        })
    }

    async fn update(
        &self,
        book: &Book,
        category_ids: Option<Vec<CategoryId>>,
    ) -> Result<Book, BookRepositoryError> {
        self.write(BookRepositoryError::query, |tables| {
            if let Some(category_id) = category_ids
                .as_deref()
                .and_then(|ids| tables.first_unknown_category(ids))
            {
                return Err(BookRepositoryError::unknown_category(category_id));
            }
            let row = tables
                .books
                .get_mut(&book.id())
                .ok_or_else(|| BookRepositoryError::missing(book.id()))?;
            row.absorb_metadata(book);
            let updated = row.clone();
            if let Some(ids) = category_ids.as_deref() {
                tables.replace_edges(book.id(), ids);
            }
            Ok(updated)
        })
    }

    async fn find_by_id(&self, book_id: &BookId) -> Result<Option<Book>, BookRepositoryError> {
        self.read(BookRepositoryError::query, |tables| {
            Ok(tables.books.get(book_id).cloned())
        })
    }

    async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, BookRepositoryError> {
        self.read(BookRepositoryError::query, |tables| {
            Ok(tables
                .books
                .values()
                .filter(|book| filter.matches(book))
                .cloned()
                .collect())
        })
    }

    async fn delete(&self, book_id: &BookId) -> Result<(), BookRepositoryError> {
        self.write(BookRepositoryError::query, |tables| {
            if !tables.books.contains(book_id) {
                return Err(BookRepositoryError::missing(*book_id));
            }
            if tables.open_loan_for_book(book_id).is_some() {
                return Err(BookRepositoryError::on_loan(*book_id));
            }
            tables.books.remove(book_id);
            tables.replace_edges(*book_id, &[]);
            Ok(())
        })
    }
}
