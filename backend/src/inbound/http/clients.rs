//! Client HTTP handlers.
//!
//! ```text
//! POST   /api/v1/clients
//! GET    /api/v1/clients
//! GET    /api/v1/clients/by-national-id/{nationalId}
//! GET    /api/v1/clients/{id}
//! PUT    /api/v1/clients/{id}
//! DELETE /api/v1/clients/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Client, ClientDraft, ClientId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ClientSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientBody {
    pub name: String,
    /// Eleven ASCII digits.
    #[schema(example = "12345678901")]
    pub national_id: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<ClientBody> for ClientDraft {
    fn from(body: ClientBody) -> Self {
        Self {
            name: body.name,
            national_id: body.national_id,
            phone: body.phone,
            address: body.address,
        }
    }
}

fn client_id(raw: &str) -> ApiResult<ClientId> {
    parse_id(raw, FieldName::new("clientId"))
}

#[utoipa::path(
    post,
    path = "/api/v1/clients",
    request_body = ClientBody,
    responses(
        (status = 201, description = "Client registered", body = ClientSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "National id already registered", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "createClient"
)]
#[post("/clients")]
pub async fn create_client(
    state: web::Data<HttpState>,
    payload: web::Json<ClientBody>,
) -> ApiResult<HttpResponse> {
    let client = state
        .clients
        .create_client(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(client))
}

#[utoipa::path(
    get,
    path = "/api/v1/clients",
    responses((status = 200, description = "Clients", body = [ClientSchema])),
    tags = ["clients"],
    operation_id = "listClients"
)]
#[get("/clients")]
pub async fn list_clients(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Client>>> {
    Ok(web::Json(state.clients.list_clients().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/clients/by-national-id/{nationalId}",
    params(("nationalId" = String, Path, description = "Eleven-digit national id")),
    responses(
        (status = 200, description = "Client", body = ClientSchema),
        (status = 400, description = "Malformed national id", body = ErrorSchema),
        (status = 404, description = "Client not found", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "getClientByNationalId"
)]
#[get("/clients/by-national-id/{national_id}")]
pub async fn get_client_by_national_id(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Client>> {
    let client = state
        .clients
        .get_client_by_national_id(path.into_inner())
        .await?;
    Ok(web::Json(client))
}

#[utoipa::path(
    get,
    path = "/api/v1/clients/{id}",
    params(("id" = String, Path, description = "Client identifier")),
    responses(
        (status = 200, description = "Client", body = ClientSchema),
        (status = 404, description = "Client not found", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "getClient"
)]
#[get("/clients/{id}")]
pub async fn get_client(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Client>> {
    Ok(web::Json(state.clients.get_client(client_id(&path)?).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/clients/{id}",
    params(("id" = String, Path, description = "Client identifier")),
    request_body = ClientBody,
    responses(
        (status = 200, description = "Client updated", body = ClientSchema),
        (status = 404, description = "Client not found", body = ErrorSchema),
        (status = 409, description = "National id already registered", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "updateClient"
)]
#[put("/clients/{id}")]
pub async fn update_client(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ClientBody>,
) -> ApiResult<web::Json<Client>> {
    let client = state
        .clients
        .update_client(client_id(&path)?, payload.into_inner().into())
        .await?;
    Ok(web::Json(client))
}

#[utoipa::path(
    delete,
    path = "/api/v1/clients/{id}",
    params(("id" = String, Path, description = "Client identifier")),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 400, description = "Client has open loans", body = ErrorSchema),
        (status = 404, description = "Client not found", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "deleteClient"
)]
#[delete("/clients/{id}")]
pub async fn delete_client(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.clients.delete_client(client_id(&path)?).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{library_state, test_app};

    fn register(national_id: &str) -> actix_http::Request {
        actix_test::TestRequest::post()
            .uri("/api/v1/clients")
            .set_json(json!({
                "name": "Capitu",
                "nationalId": national_id,
                "phone": "21 5555-0101",
            }))
            .to_request()
    }

    #[actix_web::test]
    async fn national_id_is_unique_and_searchable() {
        let app = actix_test::init_service(test_app(library_state())).await;
        let created: Value =
            actix_test::call_and_read_body_json(&app, register("12345678901")).await;
        assert_eq!(created["nationalId"], "12345678901");

        let res = actix_test::call_service(&app, register("12345678901")).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/clients/by-national-id/12345678901")
            .to_request();
        let found: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(found["id"], created["id"]);
    }

    #[rstest]
    #[case("1234567890")]
    #[case("1234567890a")]
    #[actix_web::test]
    async fn malformed_national_ids_are_rejected(#[case] national_id: &str) {
        let app = actix_test::init_service(test_app(library_state())).await;
        let res = actix_test::call_service(&app, register(national_id)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn clients_with_open_loans_cannot_be_deleted() {
        let app = actix_test::init_service(test_app(library_state())).await;
        let client: Value =
            actix_test::call_and_read_body_json(&app, register("12345678901")).await;
        let book: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/books")
                .set_json(json!({ "title": "Helena", "author": "Machado de Assis" }))
                .to_request(),
        )
        .await;
        let employee: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/employees")
                .set_json(json!({ "name": "Ana", "email": "ana@library.org", "password": "pw" }))
                .to_request(),
        )
        .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/loans")
                .set_json(json!({
                    "clientId": client["id"],
                    "bookId": book["id"],
                    "employeeId": employee["id"],
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let uri = format!("/api/v1/clients/{}", client["id"].as_str().expect("id"));
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::delete().uri(&uri).to_request())
                .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "dependency_violation");
    }
}
