//! Book categories.

use std::fmt;

use serde::Serialize;

use super::text::{self, TextViolation};
use super::{CategoryId, RecordKey};

pub const CATEGORY_NAME_MAX: usize = 50;
pub const CATEGORY_DESCRIPTION_MAX: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong { max: usize },
    DescriptionTooLong { max: usize },
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "category name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "category name must be at most {max} characters")
            }
            Self::DescriptionTooLong { max } => {
                write!(f, "description must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
}

/// A named grouping of books. Names are unique ignoring case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(skip)]
    key: Option<RecordKey>,
    id: CategoryId,
    name: String,
    description: Option<String>,
}

impl Category {
    pub fn new(draft: CategoryDraft) -> Result<Self, CategoryValidationError> {
        Self::with_id(CategoryId::random(), draft)
    }

    pub fn with_id(id: CategoryId, draft: CategoryDraft) -> Result<Self, CategoryValidationError> {
        let name = text::required(&draft.name, CATEGORY_NAME_MAX).map_err(|v| match v {
            TextViolation::Blank => CategoryValidationError::EmptyName,
            TextViolation::TooLong => CategoryValidationError::NameTooLong {
                max: CATEGORY_NAME_MAX,
            },
        })?;
        let description = text::optional(draft.description.as_deref(), CATEGORY_DESCRIPTION_MAX)
            .map_err(|_| CategoryValidationError::DescriptionTooLong {
                max: CATEGORY_DESCRIPTION_MAX,
            })?;
        Ok(Self {
            key: None,
            id,
            name,
            description,
        })
    }

    pub fn key(&self) -> Option<RecordKey> {
        self.key
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Case-folded name used for uniqueness and exact-name lookups.
    pub fn name_key(&self) -> String {
        Self::fold_name(&self.name)
    }

    pub fn fold_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    pub(crate) fn assign_key(&mut self, key: RecordKey) {
        self.key = Some(key);
    }
}
