//! Book catalogue service.
//!
//! Implements [`BookCatalogue`] over the book repository and the category
//! edge set. Availability is never written here.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    BookCatalogue, BookRepository, BookRepositoryError, CategoryAssociationError,
    CategoryAssociationRepository, CreateBookRequest, UpdateBookRequest,
};
use crate::domain::{Book, BookDetails, BookFilter, BookId, Category, CategoryId, Error};

#[derive(Clone)]
pub struct CatalogueService<B, A> {
    books: Arc<B>,
    associations: Arc<A>,
}

impl<B, A> CatalogueService<B, A> {
    pub fn new(books: Arc<B>, associations: Arc<A>) -> Self {
        Self {
            books,
            associations,
        }
    }
}

fn map_book_error(err: BookRepositoryError) -> Error {
    match err {
        BookRepositoryError::Connection { message } => {
            error!(%message, "book repository unavailable");
            Error::service_unavailable("book repository unavailable")
        }
        BookRepositoryError::Query { message } => {
            error!(%message, "book repository query failed");
            Error::internal(format!("book repository error: {message}"))
        }
        BookRepositoryError::Missing { book_id } => {
            Error::not_found(format!("book {book_id} not found"))
        }
        BookRepositoryError::UnknownCategory { category_id } => {
            Error::not_found(format!("category {category_id} not found"))
        }
        BookRepositoryError::OnLoan { book_id } => {
            Error::dependency_violation(format!("book {book_id} is on loan"))
        }
    }
}

fn map_association_error(err: CategoryAssociationError) -> Error {
    match err {
        CategoryAssociationError::Connection { message } => {
            error!(%message, "association store unavailable");
            Error::service_unavailable("association store unavailable")
        }
        CategoryAssociationError::Query { message } => {
            error!(%message, "association store query failed");
            Error::internal(format!("association store error: {message}"))
        }
        CategoryAssociationError::BookMissing { book_id } => {
            Error::not_found(format!("book {book_id} not found"))
        }
        CategoryAssociationError::CategoryMissing { category_id } => {
            Error::not_found(format!("category {category_id} not found"))
        }
    }
}

/// Drop duplicate identifiers while keeping first-seen order.
fn dedupe(ids: Vec<CategoryId>) -> Vec<CategoryId> {
    let mut seen = BTreeSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

impl<B, A> CatalogueService<B, A>
where
    B: BookRepository,
    A: CategoryAssociationRepository,
{
    async fn details(&self, book: Book) -> Result<BookDetails, Error> {
        let category_ids = self
            .associations
            .categories_for_book(&book.id())
            .await
            .map_err(map_association_error)?
            .iter()
            .map(Category::id)
            .collect();
        Ok(BookDetails { book, category_ids })
    }

    async fn find_book(&self, book_id: BookId) -> Result<Book, Error> {
        self.books
            .find_by_id(&book_id)
            .await
            .map_err(map_book_error)?
            .ok_or_else(|| Error::not_found(format!("book {book_id} not found")))
    }
}

#[async_trait]
impl<B, A> BookCatalogue for CatalogueService<B, A>
where
    B: BookRepository,
    A: CategoryAssociationRepository,
{
    async fn create_book(&self, request: CreateBookRequest) -> Result<BookDetails, Error> {
        let book =
            Book::new(request.draft).map_err(|err| Error::invalid_request(err.to_string()))?;
        let category_ids = dedupe(request.category_ids);
        let stored = self
            .books
            .insert(&book, &category_ids)
            .await
            .map_err(map_book_error)?;
        info!(book_id = %stored.id(), "book catalogued");
        Ok(BookDetails {
            book: stored,
            category_ids,
        })
    }

    async fn get_book(&self, book_id: BookId) -> Result<BookDetails, Error> {
        let book = self.find_book(book_id).await?;
        self.details(book).await
    }

    async fn list_books(&self, filter: BookFilter) -> Result<Vec<Book>, Error> {
        self.books.list(&filter).await.map_err(map_book_error)
    }

    async fn update_book(&self, request: UpdateBookRequest) -> Result<BookDetails, Error> {
        let mut book = self.find_book(request.book_id).await?;
        book.revise(request.draft)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let stored = self
            .books
            .update(&book, request.category_ids.map(dedupe))
            .await
            .map_err(map_book_error)?;
        self.details(stored).await
    }

    async fn delete_book(&self, book_id: BookId) -> Result<(), Error> {
        self.books.delete(&book_id).await.map_err(map_book_error)?;
        info!(%book_id, "book removed");
        Ok(())
    }

    async fn attach_category(
        &self,
        book_id: BookId,
        category_id: CategoryId,
    ) -> Result<(), Error> {
        self.associations
            .add(&book_id, &category_id)
            .await
            .map_err(map_association_error)
    }

    async fn detach_category(
        &self,
        book_id: BookId,
        category_id: CategoryId,
    ) -> Result<(), Error> {
        self.associations
            .remove(&book_id, &category_id)
            .await
            .map_err(map_association_error)
    }

    async fn categories_of_book(&self, book_id: BookId) -> Result<Vec<Category>, Error> {
        self.associations
            .categories_for_book(&book_id)
            .await
            .map_err(map_association_error)
    }

    async fn books_in_category(&self, category_id: CategoryId) -> Result<Vec<Book>, Error> {
        self.associations
            .books_for_category(&category_id)
            .await
            .map_err(map_association_error)
    }
}
