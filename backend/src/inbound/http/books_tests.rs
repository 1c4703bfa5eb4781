//! Tests for book catalogue HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{library_state, test_app};

async fn post_json(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    uri: &str,
    body: Value,
) -> (StatusCode, Value) {
    let req = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    let res = actix_test::call_service(app, req).await;
    let status = res.status();
    let body = actix_test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

#[actix_web::test]
async fn created_books_are_available_and_carry_categories() {
    let app = actix_test::init_service(test_app(library_state())).await;
    let (status, category) = post_json(
        &app,
        "/api/v1/categories",
        json!({ "name": "Romance", "description": null }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, book) = post_json(
        &app,
        "/api/v1/books",
        json!({
            "title": "Dom Casmurro",
            "author": "Machado de Assis",
            "publicationYear": 1899,
            "categoryIds": [category["id"]],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(book["available"], true);
    assert_eq!(book["publicationYear"], 1899);
    assert_eq!(book["categoryIds"], json!([category["id"]]));

    let uri = format!("/api/v1/books/{}/categories", book["id"].as_str().expect("id"));
    let req = actix_test::TestRequest::get().uri(&uri).to_request();
    let listed: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed[0]["name"], "Romance");
}

#[actix_web::test]
async fn availability_cannot_be_written_by_clients() {
    let app = actix_test::init_service(test_app(library_state())).await;
    let (status, body) = post_json(
        &app,
        "/api/v1/books",
        json!({ "title": "Iracema", "author": "José de Alencar", "available": false }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn unknown_category_is_not_found() {
    let app = actix_test::init_service(test_app(library_state())).await;
    let (status, body) = post_json(
        &app,
        "/api/v1/books",
        json!({
            "title": "Iracema",
            "author": "José de Alencar",
            "categoryIds": ["00000000-0000-0000-0000-0000000000aa"],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[case("/api/v1/books/not-a-uuid")]
#[case("/api/v1/books/123")]
#[actix_web::test]
async fn malformed_identifiers_are_rejected(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(library_state())).await;
    let req = actix_test::TestRequest::get().uri(uri).to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "bookId");
    assert_eq!(body["details"]["code"], "invalid_uuid");
}

#[actix_web::test]
async fn listing_filters_by_title_fragment() {
    let app = actix_test::init_service(test_app(library_state())).await;
    for (title, author) in [("Dom Casmurro", "Machado de Assis"), ("Iracema", "José de Alencar")] {
        let (status, _) = post_json(
            &app,
            "/api/v1/books",
            json!({ "title": title, "author": author }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/books?title=casm")
        .to_request();
    let books: Value = actix_test::call_and_read_body_json(&app, req).await;
    let books = books.as_array().expect("array");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Dom Casmurro");
}

#[actix_web::test]
async fn update_without_category_ids_keeps_associations() {
    let app = actix_test::init_service(test_app(library_state())).await;
    let (_, category) = post_json(&app, "/api/v1/categories", json!({ "name": "Poesia" })).await;
    let (_, book) = post_json(
        &app,
        "/api/v1/books",
        json!({ "title": "Lira", "author": "Gonzaga", "categoryIds": [category["id"]] }),
    )
    .await;

    let uri = format!("/api/v1/books/{}", book["id"].as_str().expect("id"));
    let req = actix_test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({ "title": "Marília de Dirceu", "author": "Tomás Antônio Gonzaga" }))
        .to_request();
    let updated: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["title"], "Marília de Dirceu");
    assert_eq!(updated["id"], book["id"]);
    assert_eq!(updated["categoryIds"], json!([category["id"]]));
}

#[actix_web::test]
async fn deleting_a_book_returns_no_content_then_not_found() {
    let app = actix_test::init_service(test_app(library_state())).await;
    let (_, book) = post_json(
        &app,
        "/api/v1/books",
        json!({ "title": "Iracema", "author": "José de Alencar" }),
    )
    .await;
    let uri = format!("/api/v1/books/{}", book["id"].as_str().expect("id"));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn attach_and_detach_category() {
    let app = actix_test::init_service(test_app(library_state())).await;
    let (_, category) = post_json(&app, "/api/v1/categories", json!({ "name": "Drama" })).await;
    let (_, book) = post_json(
        &app,
        "/api/v1/books",
        json!({ "title": "Auto da Compadecida", "author": "Ariano Suassuna" }),
    )
    .await;
    let book_id = book["id"].as_str().expect("id");
    let category_id = category["id"].as_str().expect("id");
    let edge = format!("/api/v1/books/{book_id}/categories/{category_id}");

    let res =
        actix_test::call_service(&app, actix_test::TestRequest::put().uri(&edge).to_request())
            .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let req = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/categories/{category_id}/books"))
        .to_request();
    let books: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(books[0]["id"], book["id"]);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri(&edge).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let req = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/books/{book_id}/categories"))
        .to_request();
    let categories: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(categories, json!([]));
}
