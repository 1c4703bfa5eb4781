//! Book catalogue HTTP handlers.
//!
//! ```text
//! POST   /api/v1/books
//! GET    /api/v1/books?available=true&title=..&author=..
//! GET    /api/v1/books/{id}
//! PUT    /api/v1/books/{id}
//! DELETE /api/v1/books/{id}
//! GET    /api/v1/books/{id}/categories
//! PUT    /api/v1/books/{id}/categories/{categoryId}
//! DELETE /api/v1/books/{id}/categories/{categoryId}
//! ```
//!
//! Bodies never carry an availability flag; unknown fields are rejected.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CreateBookRequest, UpdateBookRequest};
use crate::domain::{Book, BookDetails, BookDraft, BookFilter, BookId, CategoryId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{BookDetailsSchema, BookSchema, CategorySchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, parse_id_list};

/// Request payload for creating or replacing a book.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookBody {
    pub title: String,
    pub author: String,
    pub publication_year: Option<i32>,
    /// Categories to associate. On update, omitting the field keeps the
    /// current associations and an empty list clears them.
    #[schema(value_type = Option<Vec<uuid::Uuid>>)]
    pub category_ids: Option<Vec<String>>,
}

impl BookBody {
    fn draft(&self) -> BookDraft {
        BookDraft {
            title: self.title.clone(),
            author: self.author.clone(),
            publication_year: self.publication_year,
        }
    }

    fn category_ids(&self) -> ApiResult<Option<Vec<CategoryId>>> {
        self.category_ids
            .as_deref()
            .map(|ids| parse_id_list(ids, FieldName::new("categoryIds")))
            .transpose()
    }
}

/// Query parameters accepted by the book listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct BookListQuery {
    /// Only list books that are not on loan.
    #[serde(default)]
    pub available: bool,
    /// Case-insensitive title fragment.
    pub title: Option<String>,
    /// Case-insensitive author fragment.
    pub author: Option<String>,
}

impl From<BookListQuery> for BookFilter {
    fn from(query: BookListQuery) -> Self {
        Self {
            available_only: query.available,
            title_contains: query.title.filter(|t| !t.trim().is_empty()),
            author_contains: query.author.filter(|a| !a.trim().is_empty()),
        }
    }
}

/// Book together with its category identifiers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetailsBody {
    #[serde(flatten)]
    pub book: Book,
    pub category_ids: Vec<CategoryId>,
}

impl From<BookDetails> for BookDetailsBody {
    fn from(details: BookDetails) -> Self {
        Self {
            book: details.book,
            category_ids: details.category_ids,
        }
    }
}

fn book_id(raw: &str) -> ApiResult<BookId> {
    parse_id(raw, FieldName::new("bookId"))
}

fn category_id(raw: &str) -> ApiResult<CategoryId> {
    parse_id(raw, FieldName::new("categoryId"))
}

/// Add a book to the catalogue. New books are available.
#[utoipa::path(
    post,
    path = "/api/v1/books",
    request_body = BookBody,
    responses(
        (status = 201, description = "Book created", body = BookDetailsSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown category", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "createBook"
)]
#[post("/books")]
pub async fn create_book(
    state: web::Data<HttpState>,
    payload: web::Json<BookBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let request = CreateBookRequest {
        draft: body.draft(),
        category_ids: body.category_ids()?.unwrap_or_default(),
    };
    let details = state.books.create_book(request).await?;
    Ok(HttpResponse::Created().json(BookDetailsBody::from(details)))
}

#[utoipa::path(
    get,
    path = "/api/v1/books",
    params(BookListQuery),
    responses(
        (status = 200, description = "Books in insertion order", body = [BookSchema])
    ),
    tags = ["books"],
    operation_id = "listBooks"
)]
#[get("/books")]
pub async fn list_books(
    state: web::Data<HttpState>,
    query: web::Query<BookListQuery>,
) -> ApiResult<web::Json<Vec<Book>>> {
    let books = state.books.list_books(query.into_inner().into()).await?;
    Ok(web::Json(books))
}

#[utoipa::path(
    get,
    path = "/api/v1/books/{id}",
    params(("id" = String, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "Book", body = BookDetailsSchema),
        (status = 404, description = "Book not found", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "getBook"
)]
#[get("/books/{id}")]
pub async fn get_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BookDetailsBody>> {
    let details = state.books.get_book(book_id(&path)?).await?;
    Ok(web::Json(details.into()))
}

/// Replace a book's metadata. Availability is kept as stored.
#[utoipa::path(
    put,
    path = "/api/v1/books/{id}",
    params(("id" = String, Path, description = "Book identifier")),
    request_body = BookBody,
    responses(
        (status = 200, description = "Book updated", body = BookDetailsSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Book or category not found", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "updateBook"
)]
#[put("/books/{id}")]
pub async fn update_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<BookBody>,
) -> ApiResult<web::Json<BookDetailsBody>> {
    let body = payload.into_inner();
    let request = UpdateBookRequest {
        book_id: book_id(&path)?,
        draft: body.draft(),
        category_ids: body.category_ids()?,
    };
    let details = state.books.update_book(request).await?;
    Ok(web::Json(details.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/books/{id}",
    params(("id" = String, Path, description = "Book identifier")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Book is on loan", body = ErrorSchema),
        (status = 404, description = "Book not found", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "deleteBook"
)]
#[delete("/books/{id}")]
pub async fn delete_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.books.delete_book(book_id(&path)?).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/v1/books/{id}/categories",
    params(("id" = String, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "Categories of the book", body = [CategorySchema]),
        (status = 404, description = "Book not found", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "listBookCategories"
)]
#[get("/books/{id}/categories")]
pub async fn list_book_categories(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let categories = state.books.categories_of_book(book_id(&path)?).await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[utoipa::path(
    put,
    path = "/api/v1/books/{id}/categories/{categoryId}",
    params(
        ("id" = String, Path, description = "Book identifier"),
        ("categoryId" = String, Path, description = "Category identifier")
    ),
    responses(
        (status = 204, description = "Category attached"),
        (status = 404, description = "Book or category not found", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "attachCategory"
)]
#[put("/books/{id}/categories/{category_id}")]
pub async fn attach_category(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (book, category) = path.into_inner();
    state
        .books
        .attach_category(book_id(&book)?, category_id(&category)?)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    delete,
    path = "/api/v1/books/{id}/categories/{categoryId}",
    params(
        ("id" = String, Path, description = "Book identifier"),
        ("categoryId" = String, Path, description = "Category identifier")
    ),
    responses(
        (status = 204, description = "Category detached"),
        (status = 404, description = "Book or category not found", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "detachCategory"
)]
#[delete("/books/{id}/categories/{category_id}")]
pub async fn detach_category(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (book, category) = path.into_inner();
    state
        .books
        .detach_category(book_id(&book)?, category_id(&category)?)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "books_tests.rs"]
mod tests;
