//! Book records and catalogue filters.
//!
//! A book's availability flag is derived state: it is `true` unless exactly
//! one open loan references the book. Catalogue edits can change metadata
//! only; the flag is flipped by the loan commit path in the store.

use std::fmt;

use serde::Serialize;

use super::text::{self, TextViolation};
use super::{BookId, CategoryId, RecordKey};

/// Maximum title length in characters.
pub const TITLE_MAX: usize = 200;
/// Maximum author length in characters.
pub const AUTHOR_MAX: usize = 100;

/// Validation errors raised by [`Book::new`] and [`Book::revise`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    EmptyTitle,
    TitleTooLong { max: usize },
    EmptyAuthor,
    AuthorTooLong { max: usize },
}

impl fmt::Display for BookValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::EmptyAuthor => write!(f, "author must not be empty"),
            Self::AuthorTooLong { max } => write!(f, "author must be at most {max} characters"),
        }
    }
}

impl std::error::Error for BookValidationError {}

/// Editable book metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub publication_year: Option<i32>,
}

/// A catalogued book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(skip)]
    key: Option<RecordKey>,
    id: BookId,
    title: String,
    author: String,
    publication_year: Option<i32>,
    available: bool,
}

impl Book {
    /// Validate a draft into a new, available book with a fresh identifier.
    pub fn new(draft: BookDraft) -> Result<Self, BookValidationError> {
        let (title, author) = validate(&draft)?;
        Ok(Self {
            key: None,
            id: BookId::random(),
            title,
            author,
            publication_year: draft.publication_year,
            available: true,
        })
    }

    /// Replace the editable metadata, leaving identity and availability alone.
    pub fn revise(&mut self, draft: BookDraft) -> Result<(), BookValidationError> {
        let (title, author) = validate(&draft)?;
        self.title = title;
        self.author = author;
        self.publication_year = draft.publication_year;
        Ok(())
    }

    pub fn key(&self) -> Option<RecordKey> {
        self.key
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    pub fn publication_year(&self) -> Option<i32> {
        self.publication_year
    }

    /// Whether no open loan currently references this book.
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub(crate) fn assign_key(&mut self, key: RecordKey) {
        self.key = Some(key);
    }

    /// Copy metadata from `revised`, keeping this record's key and flag.
    pub(crate) fn absorb_metadata(&mut self, revised: &Book) {
        self.title.clone_from(&revised.title);
        self.author.clone_from(&revised.author);
        self.publication_year = revised.publication_year;
    }

    pub(crate) fn mark_on_loan(&mut self) {
        self.available = false;
    }

    pub(crate) fn mark_returned(&mut self) {
        self.available = true;
    }
}

fn validate(draft: &BookDraft) -> Result<(String, String), BookValidationError> {
    let title = text::required(&draft.title, TITLE_MAX).map_err(|v| match v {
        TextViolation::Blank => BookValidationError::EmptyTitle,
        TextViolation::TooLong => BookValidationError::TitleTooLong { max: TITLE_MAX },
    })?;
    let author = text::required(&draft.author, AUTHOR_MAX).map_err(|v| match v {
        TextViolation::Blank => BookValidationError::EmptyAuthor,
        TextViolation::TooLong => BookValidationError::AuthorTooLong { max: AUTHOR_MAX },
    })?;
    Ok((title, author))
}

/// Book together with its category edge projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetails {
    pub book: Book,
    pub category_ids: Vec<CategoryId>,
}

/// Scan filter for book listings. Text filters are case-insensitive
/// substring matches; all present criteria must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub available_only: bool,
    pub title_contains: Option<String>,
    pub author_contains: Option<String>,
}

impl BookFilter {
    /// Filter matching every book.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter matching only available books.
    #[must_use]
    pub fn available() -> Self {
        Self {
            available_only: true,
            ..Self::default()
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        if self.available_only && !book.is_available() {
            return false;
        }
        let title_ok = self
            .title_contains
            .as_deref()
            .is_none_or(|needle| text::contains_ignore_case(book.title(), needle));
        let author_ok = self
            .author_contains
            .as_deref()
            .is_none_or(|needle| text::contains_ignore_case(book.author(), needle));
        title_ok && author_ok
    }
}
