//! HTTP inbound adapter exposing REST endpoints.

pub mod books;
pub mod categories;
pub mod clients;
pub mod employees;
pub mod error;
pub mod health;
pub mod loans;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` resource on `cfg`.
///
/// Literal segments (`by-name`, `by-national-id`, `login`) are registered
/// before their `{id}` siblings so they are matched first.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(books::create_book)
        .service(books::list_books)
        .service(books::get_book)
        .service(books::update_book)
        .service(books::delete_book)
        .service(books::list_book_categories)
        .service(books::attach_category)
        .service(books::detach_category)
        .service(categories::create_category)
        .service(categories::list_categories)
        .service(categories::get_category_by_name)
        .service(categories::get_category)
        .service(categories::update_category)
        .service(categories::delete_category)
        .service(categories::list_category_books)
        .service(clients::create_client)
        .service(clients::list_clients)
        .service(clients::get_client_by_national_id)
        .service(clients::get_client)
        .service(clients::update_client)
        .service(clients::delete_client)
        .service(employees::login)
        .service(employees::create_employee)
        .service(employees::list_employees)
        .service(employees::get_employee)
        .service(employees::update_employee)
        .service(employees::activate_employee)
        .service(employees::deactivate_employee)
        .service(employees::delete_employee)
        .service(loans::open_loan)
        .service(loans::list_loans)
        .service(loans::return_loan)
        .service(loans::get_loan)
        .service(loans::amend_loan)
        .service(loans::delete_loan);
}

/// Extractor configuration mapping malformed bodies, queries and paths to
/// `invalid_request` responses.
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler));
}
