//! Driving port for category reference data.

use async_trait::async_trait;

use crate::domain::{Category, CategoryDraft, CategoryId, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryDirectory: Send + Sync {
    async fn create_category(&self, draft: CategoryDraft) -> Result<Category, Error>;

    async fn get_category(&self, category_id: CategoryId) -> Result<Category, Error>;

    /// Exact lookup ignoring case.
    async fn get_category_by_name(&self, name: String) -> Result<Category, Error>;

    /// Categories whose name contains `fragment`, ignoring case.
    async fn search_categories(&self, fragment: String) -> Result<Vec<Category>, Error>;

    async fn list_categories(&self) -> Result<Vec<Category>, Error>;

    async fn update_category(
        &self,
        category_id: CategoryId,
        draft: CategoryDraft,
    ) -> Result<Category, Error>;

    /// Delete a category with no associated books.
    async fn delete_category(&self, category_id: CategoryId) -> Result<(), Error>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCategoryDirectory;

#[async_trait]
impl CategoryDirectory for FixtureCategoryDirectory {
    async fn create_category(&self, draft: CategoryDraft) -> Result<Category, Error> {
        Category::new(draft).map_err(|err| Error::invalid_request(err.to_string()))
    }

    async fn get_category(&self, category_id: CategoryId) -> Result<Category, Error> {
        Err(Error::not_found(format!("category {category_id} not found")))
    }

    async fn get_category_by_name(&self, name: String) -> Result<Category, Error> {
        Err(Error::not_found(format!("category {name} not found")))
    }

    async fn search_categories(&self, _fragment: String) -> Result<Vec<Category>, Error> {
        Ok(Vec::new())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        Ok(Vec::new())
    }

    async fn update_category(
        &self,
        category_id: CategoryId,
        _draft: CategoryDraft,
    ) -> Result<Category, Error> {
        Err(Error::not_found(format!("category {category_id} not found")))
    }

    async fn delete_category(&self, category_id: CategoryId) -> Result<(), Error> {
        Err(Error::not_found(format!("category {category_id} not found")))
    }
}
