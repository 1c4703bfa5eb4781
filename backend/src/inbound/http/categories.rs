//! Category HTTP handlers.
//!
//! ```text
//! POST   /api/v1/categories
//! GET    /api/v1/categories?name=..
//! GET    /api/v1/categories/by-name/{name}
//! GET    /api/v1/categories/{id}
//! PUT    /api/v1/categories/{id}
//! DELETE /api/v1/categories/{id}
//! GET    /api/v1/categories/{id}/books
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Category, CategoryDraft, CategoryId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{BookSchema, CategorySchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryBody {
    pub name: String,
    pub description: Option<String>,
}

impl From<CategoryBody> for CategoryDraft {
    fn from(body: CategoryBody) -> Self {
        Self {
            name: body.name,
            description: body.description,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CategoryListQuery {
    /// Case-insensitive name fragment; lists every category when absent.
    pub name: Option<String>,
}

fn category_id(raw: &str) -> ApiResult<CategoryId> {
    parse_id(raw, FieldName::new("categoryId"))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CategoryBody,
    responses(
        (status = 201, description = "Category created", body = CategorySchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Name already taken", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    payload: web::Json<CategoryBody>,
) -> ApiResult<HttpResponse> {
    let category = state
        .categories
        .create_category(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(category))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    params(CategoryListQuery),
    responses((status = 200, description = "Categories", body = [CategorySchema])),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    query: web::Query<CategoryListQuery>,
) -> ApiResult<web::Json<Vec<Category>>> {
    let categories = match query.into_inner().name {
        Some(fragment) if !fragment.trim().is_empty() => {
            state.categories.search_categories(fragment).await?
        }
        _ => state.categories.list_categories().await?,
    };
    Ok(web::Json(categories))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/by-name/{name}",
    params(("name" = String, Path, description = "Exact name, ignoring case")),
    responses(
        (status = 200, description = "Category", body = CategorySchema),
        (status = 404, description = "Category not found", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "getCategoryByName"
)]
#[get("/categories/by-name/{name}")]
pub async fn get_category_by_name(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Category>> {
    let category = state
        .categories
        .get_category_by_name(path.into_inner())
        .await?;
    Ok(web::Json(category))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(("id" = String, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category", body = CategorySchema),
        (status = 404, description = "Category not found", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "getCategory"
)]
#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Category>> {
    let category = state.categories.get_category(category_id(&path)?).await?;
    Ok(web::Json(category))
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(("id" = String, Path, description = "Category identifier")),
    request_body = CategoryBody,
    responses(
        (status = 200, description = "Category updated", body = CategorySchema),
        (status = 404, description = "Category not found", body = ErrorSchema),
        (status = 409, description = "Name already taken", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "updateCategory"
)]
#[put("/categories/{id}")]
pub async fn update_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CategoryBody>,
) -> ApiResult<web::Json<Category>> {
    let category = state
        .categories
        .update_category(category_id(&path)?, payload.into_inner().into())
        .await?;
    Ok(web::Json(category))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = String, Path, description = "Category identifier")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 400, description = "Books still reference the category", body = ErrorSchema),
        (status = 404, description = "Category not found", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory"
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state
        .categories
        .delete_category(category_id(&path)?)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}/books",
    params(("id" = String, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Books in the category", body = [BookSchema]),
        (status = 404, description = "Category not found", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "listCategoryBooks"
)]
#[get("/categories/{id}/books")]
pub async fn list_category_books(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let books = state.books.books_in_category(category_id(&path)?).await?;
    Ok(HttpResponse::Ok().json(books))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{library_state, test_app};

    fn create(name: &str) -> actix_http::Request {
        actix_test::TestRequest::post()
            .uri("/api/v1/categories")
            .set_json(json!({ "name": name }))
            .to_request()
    }

    #[actix_web::test]
    async fn names_are_unique_ignoring_case() {
        let app = actix_test::init_service(test_app(library_state())).await;
        let res = actix_test::call_service(&app, create("Poesia")).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let res = actix_test::call_service(&app, create("POESIA")).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn name_query_searches_and_by_name_matches_exactly() {
        let app = actix_test::init_service(test_app(library_state())).await;
        for name in ["Ficção", "Ficção Científica", "Poesia"] {
            let res = actix_test::call_service(&app, create(name)).await;
            assert_eq!(res.status(), StatusCode::CREATED);
        }

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/categories?name=fic")
            .to_request();
        let found: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(found.as_array().map(Vec::len), Some(2));

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/categories/by-name/poesia")
            .to_request();
        let exact: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(exact["name"], "Poesia");

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/categories/by-name/Drama")
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn categories_in_use_cannot_be_deleted() {
        let app = actix_test::init_service(test_app(library_state())).await;
        let category: Value = actix_test::call_and_read_body_json(&app, create("Drama")).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/books")
            .set_json(json!({
                "title": "Vestido de Noiva",
                "author": "Nelson Rodrigues",
                "categoryIds": [category["id"]],
            }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let uri = format!("/api/v1/categories/{}", category["id"].as_str().expect("id"));
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::delete().uri(&uri).to_request())
                .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "dependency_violation");
    }
}
