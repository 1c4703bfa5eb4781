//! Book/category edges over the in-memory store.

mod support;

use library_backend::domain::ports::{BookCatalogue, CategoryDirectory, UpdateBookRequest};
use library_backend::domain::{BookDraft, CategoryDraft, CategoryId, ErrorCode};
use support::Library;

async fn category(library: &Library, name: &str) -> CategoryId {
    library
        .categories
        .create_category(CategoryDraft {
            name: name.to_owned(),
            description: None,
        })
        .await
        .expect("category created")
        .id()
}

#[tokio::test]
async fn category_deletion_waits_for_its_books_to_leave() {
    let library = Library::new();
    let fiction = category(&library, "Fiction").await;
    let first = library.book("Dom Casmurro").await;
    let second = library.book("Helena").await;
    for book in [first, second] {
        library
            .catalogue
            .attach_category(book, fiction)
            .await
            .expect("attach");
    }

    let err = library
        .categories
        .delete_category(fiction)
        .await
        .expect_err("category still has books");
    assert_eq!(err.code(), ErrorCode::DependencyViolation);

    library
        .catalogue
        .detach_category(first, fiction)
        .await
        .expect("detach");
    library
        .catalogue
        .delete_book(second)
        .await
        .expect("deleting a book drops its edges");

    library
        .categories
        .delete_category(fiction)
        .await
        .expect("no books left");
}

#[tokio::test]
async fn edges_are_idempotent_and_visible_from_both_ends() {
    let library = Library::new();
    let fiction = category(&library, "Fiction").await;
    let book = library.book("Quincas Borba").await;

    for _ in 0..2 {
        library
            .catalogue
            .attach_category(book, fiction)
            .await
            .expect("attach");
    }
    let in_category = library
        .catalogue
        .books_in_category(fiction)
        .await
        .expect("books");
    assert_eq!(in_category.len(), 1);
    assert_eq!(in_category[0].id(), book);

    for _ in 0..2 {
        library
            .catalogue
            .detach_category(book, fiction)
            .await
            .expect("detach");
    }
    let of_book = library
        .catalogue
        .categories_of_book(book)
        .await
        .expect("categories");
    assert!(of_book.is_empty());
}

#[tokio::test]
async fn full_update_replaces_the_edge_set() {
    let library = Library::new();
    let fiction = category(&library, "Fiction").await;
    let romance = category(&library, "Romance").await;
    let classics = category(&library, "Classics").await;
    let book = library.book("Iaiá Garcia").await;
    library
        .catalogue
        .attach_category(book, fiction)
        .await
        .expect("attach");
    library
        .catalogue
        .attach_category(book, romance)
        .await
        .expect("attach");

    let details = library
        .catalogue
        .update_book(UpdateBookRequest {
            book_id: book,
            draft: BookDraft {
                title: "Iaiá Garcia".to_owned(),
                author: "Machado de Assis".to_owned(),
                publication_year: Some(1878),
            },
            category_ids: Some(vec![romance, classics]),
        })
        .await
        .expect("update");

    let mut expected = vec![romance, classics];
    expected.sort();
    let mut actual = details.category_ids;
    actual.sort();
    assert_eq!(actual, expected);
    assert!(
        library
            .catalogue
            .books_in_category(fiction)
            .await
            .expect("books")
            .is_empty()
    );
}
