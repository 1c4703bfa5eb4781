//! In-memory category table and book/category edge adapters.

use async_trait::async_trait;

use crate::domain::ports::{
    CategoryAssociationError, CategoryAssociationRepository, CategoryRepository,
    CategoryRepositoryError,
};
use crate::domain::{Book, BookId, Category, CategoryId};

use super::InMemoryLibraryStore;
use super::memory_store::LibraryTables;

fn name_taken(tables: &LibraryTables, category: &Category) -> bool {
    let wanted = category.name_key();
    tables
        .categories
        .values()
        .any(|other| other.id() != category.id() && other.name_key() == wanted)
}

fn ensure_edge_ends(
    tables: &LibraryTables,
    book_id: &BookId,
    category_id: &CategoryId,
) -> Result<(), CategoryAssociationError> {
    if !tables.books.contains(book_id) {
        return Err(CategoryAssociationError::book_missing(*book_id));
    }
    if !tables.categories.contains(category_id) {
        return Err(CategoryAssociationError::category_missing(*category_id));
    }
    Ok(())
}

#[async_trait]
impl CategoryRepository for InMemoryLibraryStore {
    async fn insert(&self, category: &Category) -> Result<Category, CategoryRepositoryError> {
        self.write(CategoryRepositoryError::query, |tables| {
            if name_taken(tables, category) {
                return Err(CategoryRepositoryError::duplicate_name(category.name()));
            }
            let key = tables.allocate_key();
            let mut row = category.clone();
            row.assign_key(key);
            tables.categories.insert(key, row.id(), row.clone());
            Ok(row)
        })
    }

    async fn update(&self, category: &Category) -> Result<Category, CategoryRepositoryError> {
        self.write(CategoryRepositoryError::query, |tables| {
            let key = tables
                .categories
                .key_of(&category.id())
                .ok_or_else(|| CategoryRepositoryError::missing(category.id()))?;
            if name_taken(tables, category) {
                return Err(CategoryRepositoryError::duplicate_name(category.name()));
            }
            let mut row = category.clone();
            row.assign_key(key);
            tables.categories.insert(key, row.id(), row.clone());
            Ok(row)
        })
    }

    async fn find_by_id(
        &self,
        category_id: &CategoryId,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        self.read(CategoryRepositoryError::query, |tables| {
            Ok(tables.categories.get(category_id).cloned())
        })
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, CategoryRepositoryError> {
        let wanted = Category::fold_name(name);
        self.read(CategoryRepositoryError::query, |tables| {
            Ok(tables
                .categories
                .values()
                .find(|category| category.name_key() == wanted)
                .cloned())
        })
    }

    async fn search_by_name(
        &self,
        fragment: &str,
    ) -> Result<Vec<Category>, CategoryRepositoryError> {
        let needle = Category::fold_name(fragment);
        self.read(CategoryRepositoryError::query, |tables| {
            Ok(tables
                .categories
                .values()
                .filter(|category| category.name_key().contains(&needle))
                .cloned()
                .collect())
        })
    }

    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        self.read(CategoryRepositoryError::query, |tables| {
            Ok(tables.categories.values().cloned().collect())
        })
    }

    async fn delete(&self, category_id: &CategoryId) -> Result<(), CategoryRepositoryError> {
        self.write(CategoryRepositoryError::query, |tables| {
            if !tables.categories.contains(category_id) {
                return Err(CategoryRepositoryError::missing(*category_id));
            }
            if !tables.book_ids_in(category_id).is_empty() {
                return Err(CategoryRepositoryError::has_books(*category_id));
            }
            tables.categories.remove(category_id);
            Ok(())
        })
    }
}

#[async_trait]
impl CategoryAssociationRepository for InMemoryLibraryStore {
    async fn add(
        &self,
        book_id: &BookId,
        category_id: &CategoryId,
    ) -> Result<(), CategoryAssociationError> {
        self.write(CategoryAssociationError::query, |tables| {
            ensure_edge_ends(tables, book_id, category_id)?;
            tables.edges.insert((*book_id, *category_id));
            Ok(())
        })
    }

    async fn remove(
        &self,
        book_id: &BookId,
        category_id: &CategoryId,
    ) -> Result<(), CategoryAssociationError> {
        self.write(CategoryAssociationError::query, |tables| {
            ensure_edge_ends(tables, book_id, category_id)?;
            tables.edges.remove(&(*book_id, *category_id));
            Ok(())
        })
    }

    async fn replace_for_book(
        &self,
        book_id: &BookId,
        category_ids: &[CategoryId],
    ) -> Result<(), CategoryAssociationError> {
        self.write(CategoryAssociationError::query, |tables| {
            if !tables.books.contains(book_id) {
                return Err(CategoryAssociationError::book_missing(*book_id));
            }
            if let Some(category_id) = tables.first_unknown_category(category_ids) {
                return Err(CategoryAssociationError::category_missing(category_id));
            }
            tables.replace_edges(*book_id, category_ids);
            Ok(())
        })
    }

    async fn categories_for_book(
        &self,
        book_id: &BookId,
    ) -> Result<Vec<Category>, CategoryAssociationError> {
        self.read(CategoryAssociationError::query, |tables| {
            if !tables.books.contains(book_id) {
                return Err(CategoryAssociationError::book_missing(*book_id));
            }
            let ids = tables.category_ids_of(book_id);
            Ok(tables
                .categories
                .values()
                .filter(|category| ids.contains(&category.id()))
                .cloned()
                .collect())
        })
    }

    async fn books_for_category(
        &self,
        category_id: &CategoryId,
    ) -> Result<Vec<Book>, CategoryAssociationError> {
        self.read(CategoryAssociationError::query, |tables| {
            if !tables.categories.contains(category_id) {
                return Err(CategoryAssociationError::category_missing(*category_id));
            }
            let ids = tables.book_ids_in(category_id);
            Ok(tables
                .books
                .values()
                .filter(|book| ids.contains(&book.id()))
                .cloned()
                .collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryDraft;
    use rstest::rstest;

    fn category(name: &str) -> Category {
        Category::new(CategoryDraft {
            name: name.to_owned(),
            description: None,
        })
        .expect("valid category")
    }

    #[rstest]
    #[tokio::test]
    async fn names_are_unique_ignoring_case() {
        let store = InMemoryLibraryStore::new();
        CategoryRepository::insert(&store, &category("Poesia"))
            .await
            .expect("first insert");

        let err = CategoryRepository::insert(&store, &category("  POESIA "))
            .await
            .expect_err("duplicate name");
        assert_eq!(err, CategoryRepositoryError::duplicate_name("POESIA"));
    }

    #[rstest]
    #[tokio::test]
    async fn renaming_to_the_same_name_is_allowed() {
        let store = InMemoryLibraryStore::new();
        let stored = CategoryRepository::insert(&store, &category("Drama"))
            .await
            .expect("insert");
        let renamed = Category::with_id(
            stored.id(),
            CategoryDraft {
                name: "drama".to_owned(),
                description: Some("Stage plays".to_owned()),
            },
        )
        .expect("valid category");

        let updated = CategoryRepository::update(&store, &renamed)
            .await
            .expect("update");
        assert_eq!(updated.key(), stored.key());
        assert_eq!(updated.description(), Some("Stage plays"));
    }

    #[rstest]
    #[case("fic", 2)]
    #[case("SCIENCE", 1)]
    #[case("poetry", 0)]
    #[tokio::test]
    async fn search_matches_fragments_ignoring_case(
        #[case] fragment: &str,
        #[case] expected: usize,
    ) {
        let store = InMemoryLibraryStore::new();
        for name in ["Fiction", "Science Fiction", "History"] {
            CategoryRepository::insert(&store, &category(name))
                .await
                .expect("insert");
        }

        let found = store.search_by_name(fragment).await.expect("search");
        assert_eq!(found.len(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn edges_reject_unknown_ends() {
        let store = InMemoryLibraryStore::new();
        let stored = CategoryRepository::insert(&store, &category("Drama"))
            .await
            .expect("insert");
        let book_id = BookId::random();

        let err = store
            .add(&book_id, &stored.id())
            .await
            .expect_err("unknown book");
        assert_eq!(err, CategoryAssociationError::book_missing(book_id));
    }
}
