//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together
//! with the schema mirrors from [`crate::inbound::http::schemas`], which keep
//! domain types free of utoipa derives. The document is served by Swagger UI
//! in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::books::BookBody;
use crate::inbound::http::categories::CategoryBody;
use crate::inbound::http::clients::ClientBody;
use crate::inbound::http::employees::{EmployeeBody, LoginBody};
use crate::inbound::http::loans::{AmendLoanBody, LoanStatusFilter, OpenLoanBody, ReturnLoanBody};
use crate::inbound::http::schemas::{
    BookDetailsSchema, BookSchema, CategorySchema, ClientSchema, EmployeeSchema, ErrorCodeSchema,
    ErrorSchema, LoanSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library backend API",
        description = "Loans, catalogue and reference data for a single-branch library."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::loans::open_loan,
        crate::inbound::http::loans::list_loans,
        crate::inbound::http::loans::get_loan,
        crate::inbound::http::loans::return_loan,
        crate::inbound::http::loans::amend_loan,
        crate::inbound::http::loans::delete_loan,
        crate::inbound::http::books::create_book,
        crate::inbound::http::books::list_books,
        crate::inbound::http::books::get_book,
        crate::inbound::http::books::update_book,
        crate::inbound::http::books::delete_book,
        crate::inbound::http::books::list_book_categories,
        crate::inbound::http::books::attach_category,
        crate::inbound::http::books::detach_category,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::get_category_by_name,
        crate::inbound::http::categories::get_category,
        crate::inbound::http::categories::update_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::categories::list_category_books,
        crate::inbound::http::clients::create_client,
        crate::inbound::http::clients::list_clients,
        crate::inbound::http::clients::get_client_by_national_id,
        crate::inbound::http::clients::get_client,
        crate::inbound::http::clients::update_client,
        crate::inbound::http::clients::delete_client,
        crate::inbound::http::employees::create_employee,
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::login,
        crate::inbound::http::employees::get_employee,
        crate::inbound::http::employees::update_employee,
        crate::inbound::http::employees::activate_employee,
        crate::inbound::http::employees::deactivate_employee,
        crate::inbound::http::employees::delete_employee,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        BookSchema,
        BookDetailsSchema,
        CategorySchema,
        ClientSchema,
        EmployeeSchema,
        LoanSchema,
        BookBody,
        CategoryBody,
        ClientBody,
        EmployeeBody,
        LoginBody,
        OpenLoanBody,
        ReturnLoanBody,
        AmendLoanBody,
        LoanStatusFilter,
    )),
    tags(
        (name = "loans", description = "Lending and returning books"),
        (name = "books", description = "Catalogue and category associations"),
        (name = "categories", description = "Book categories"),
        (name = "clients", description = "Registered borrowers"),
        (name = "employees", description = "Library staff and login"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const LOAN_SCHEMA_NAME: &str = "crate.domain.Loan";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "details");
    }

    #[test]
    fn openapi_loan_schema_uses_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let loan_schema = schemas.get(LOAN_SCHEMA_NAME).expect("Loan schema");

        assert_object_schema_has_field(loan_schema, "dueAt");
        assert_object_schema_has_field(loan_schema, "closedAt");
    }

    #[test]
    fn loan_lifecycle_paths_are_documented() {
        let doc = ApiDoc::openapi();
        for path in ["/api/v1/loans", "/api/v1/loans/{id}", "/api/v1/loans/{id}/return"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
