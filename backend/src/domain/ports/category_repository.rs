//! Port for category persistence.

use async_trait::async_trait;

use crate::domain::{Category, CategoryId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by category repository adapters.
    pub enum CategoryRepositoryError {
        Connection { message: String } => "category repository connection failed: {message}",
        Query { message: String } => "category repository query failed: {message}",
        Missing { category_id: CategoryId } => "category {category_id} not found",
        /// Another category has the same name ignoring case.
        DuplicateName { name: String } => "category {name} already exists",
        /// Books are still associated with the category.
        HasBooks { category_id: CategoryId } => "category {category_id} has associated books",
    }
}

/// Keyed store for categories. Names are unique ignoring case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn insert(&self, category: &Category) -> Result<Category, CategoryRepositoryError>;

    async fn update(&self, category: &Category) -> Result<Category, CategoryRepositoryError>;

    async fn find_by_id(
        &self,
        category_id: &CategoryId,
    ) -> Result<Option<Category>, CategoryRepositoryError>;

    /// Exact, case-insensitive name lookup.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, CategoryRepositoryError>;

    /// Categories whose name contains `fragment`, ignoring case.
    async fn search_by_name(
        &self,
        fragment: &str,
    ) -> Result<Vec<Category>, CategoryRepositoryError>;

    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError>;

    /// Remove a category that has no book edges.
    async fn delete(&self, category_id: &CategoryId) -> Result<(), CategoryRepositoryError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCategoryRepository;

#[async_trait]
impl CategoryRepository for FixtureCategoryRepository {
    async fn insert(&self, category: &Category) -> Result<Category, CategoryRepositoryError> {
        Ok(category.clone())
    }

    async fn update(&self, category: &Category) -> Result<Category, CategoryRepositoryError> {
        Err(CategoryRepositoryError::missing(category.id()))
    }

    async fn find_by_id(
        &self,
        _category_id: &CategoryId,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        Ok(None)
    }

    async fn find_by_name(&self, _name: &str) -> Result<Option<Category>, CategoryRepositoryError> {
        Ok(None)
    }

    async fn search_by_name(
        &self,
        _fragment: &str,
    ) -> Result<Vec<Category>, CategoryRepositoryError> {
        Ok(Vec::new())
    }

    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete(&self, category_id: &CategoryId) -> Result<(), CategoryRepositoryError> {
        Err(CategoryRepositoryError::missing(*category_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn has_books_error_mentions_category() {
        let id = CategoryId::random();
        let err = CategoryRepositoryError::has_books(id);
        assert_eq!(
            err.to_string(),
            format!("category {id} has associated books")
        );
    }
}
