//! Category reference-data service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{CategoryDirectory, CategoryRepository, CategoryRepositoryError};
use crate::domain::{Category, CategoryDraft, CategoryId, Error};

#[derive(Clone)]
pub struct CategoryService<R> {
    repo: Arc<R>,
}

impl<R> CategoryService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_category_error(err: CategoryRepositoryError) -> Error {
    match err {
        CategoryRepositoryError::Connection { message } => {
            error!(%message, "category repository unavailable");
            Error::service_unavailable("category repository unavailable")
        }
        CategoryRepositoryError::Query { message } => {
            error!(%message, "category repository query failed");
            Error::internal(format!("category repository error: {message}"))
        }
        CategoryRepositoryError::Missing { category_id } => {
            Error::not_found(format!("category {category_id} not found"))
        }
        CategoryRepositoryError::DuplicateName { name } => {
            Error::conflict(format!("category {name} already exists"))
        }
        CategoryRepositoryError::HasBooks { category_id } => Error::dependency_violation(
            format!("category {category_id} has associated books"),
        ),
    }
}

fn invalid(err: impl ToString) -> Error {
    Error::invalid_request(err.to_string())
}

#[async_trait]
impl<R> CategoryDirectory for CategoryService<R>
where
    R: CategoryRepository,
{
    async fn create_category(&self, draft: CategoryDraft) -> Result<Category, Error> {
        let category = Category::new(draft).map_err(invalid)?;
        let stored = self
            .repo
            .insert(&category)
            .await
            .map_err(map_category_error)?;
        info!(category_id = %stored.id(), name = stored.name(), "category created");
        Ok(stored)
    }

    async fn get_category(&self, category_id: CategoryId) -> Result<Category, Error> {
        self.repo
            .find_by_id(&category_id)
            .await
            .map_err(map_category_error)?
            .ok_or_else(|| Error::not_found(format!("category {category_id} not found")))
    }

    async fn get_category_by_name(&self, name: String) -> Result<Category, Error> {
        self.repo
            .find_by_name(name.trim())
            .await
            .map_err(map_category_error)?
            .ok_or_else(|| Error::not_found(format!("category {name} not found")))
    }

    async fn search_categories(&self, fragment: String) -> Result<Vec<Category>, Error> {
        self.repo
            .search_by_name(fragment.trim())
            .await
            .map_err(map_category_error)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        self.repo.list().await.map_err(map_category_error)
    }

    async fn update_category(
        &self,
        category_id: CategoryId,
        draft: CategoryDraft,
    ) -> Result<Category, Error> {
        let category = Category::with_id(category_id, draft).map_err(invalid)?;
        self.repo
            .update(&category)
            .await
            .map_err(map_category_error)
    }

    async fn delete_category(&self, category_id: CategoryId) -> Result<(), Error> {
        self.repo
            .delete(&category_id)
            .await
            .map_err(map_category_error)?;
        info!(%category_id, "category deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockCategoryRepository;
    use rstest::rstest;

    fn draft(name: &str) -> CategoryDraft {
        CategoryDraft {
            name: name.to_owned(),
            description: None,
        }
    }

    #[rstest]
    #[case(CategoryRepositoryError::duplicate_name("Poesia"), ErrorCode::Conflict)]
    #[case(CategoryRepositoryError::has_books(CategoryId::random()), ErrorCode::DependencyViolation)]
    #[case(CategoryRepositoryError::missing(CategoryId::random()), ErrorCode::NotFound)]
    #[case(CategoryRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
    fn repository_errors_map_to_codes(
        #[case] error: CategoryRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_category_error(error).code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_blank_names_without_touching_the_store() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_insert().never();
        let service = CategoryService::new(Arc::new(repo));

        let err = service
            .create_category(draft("   "))
            .await
            .expect_err("blank name");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_the_path_identifier() {
        let id = CategoryId::random();
        let mut repo = MockCategoryRepository::new();
        repo.expect_update()
            .withf(move |category| category.id() == id)
            .return_once(|category| Ok(category.clone()));
        let service = CategoryService::new(Arc::new(repo));

        let updated = service
            .update_category(id, draft("Drama"))
            .await
            .expect("update succeeds");
        assert_eq!(updated.id(), id);
    }

    #[rstest]
    #[tokio::test]
    async fn name_lookup_reports_not_found() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_name().return_once(|_| Ok(None));
        let service = CategoryService::new(Arc::new(repo));

        let err = service
            .get_category_by_name("Terror".to_owned())
            .await
            .expect_err("no such category");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
