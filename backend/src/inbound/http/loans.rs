//! Loan HTTP handlers.
//!
//! ```text
//! POST   /api/v1/loans
//! GET    /api/v1/loans?status=open|overdue
//! GET    /api/v1/loans?clientId=..|employeeId=..|bookId=..
//! GET    /api/v1/loans/{id}
//! PUT    /api/v1/loans/{id}/return
//! PUT    /api/v1/loans/{id}
//! DELETE /api/v1/loans/{id}
//! ```
//!
//! Opening and returning go through the loan command port so book
//! availability always follows the loan's state. The amend endpoint is an
//! administrative overwrite and never touches availability.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CloseLoanRequest, LoanListing, OpenLoanRequest};
use crate::domain::{Error, Loan, LoanAmendment, LoanId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, LoanSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_id, parse_optional_id, parse_optional_rfc3339_timestamp,
    parse_rfc3339_timestamp,
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OpenLoanBody {
    #[schema(format = "uuid")]
    pub client_id: String,
    #[schema(format = "uuid")]
    pub book_id: String,
    #[schema(format = "uuid")]
    pub employee_id: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReturnLoanBody {
    /// Employee receiving the book.
    #[schema(format = "uuid")]
    pub employee_id: String,
}

/// Full replacement of a loan's fields.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AmendLoanBody {
    #[schema(format = "uuid")]
    pub client_id: String,
    #[schema(format = "uuid")]
    pub book_id: String,
    #[schema(format = "uuid")]
    pub employee_id: String,
    #[schema(format = "date-time")]
    pub opened_at: String,
    #[schema(format = "date-time")]
    pub due_at: String,
    #[schema(format = "date-time")]
    pub closed_at: Option<String>,
}

impl AmendLoanBody {
    fn into_amendment(self) -> ApiResult<LoanAmendment> {
        Ok(LoanAmendment {
            client_id: parse_id(&self.client_id, FieldName::new("clientId"))?,
            book_id: parse_id(&self.book_id, FieldName::new("bookId"))?,
            employee_id: parse_id(&self.employee_id, FieldName::new("employeeId"))?,
            opened_at: parse_rfc3339_timestamp(&self.opened_at, FieldName::new("openedAt"))?,
            due_at: parse_rfc3339_timestamp(&self.due_at, FieldName::new("dueAt"))?,
            closed_at: parse_optional_rfc3339_timestamp(
                self.closed_at.as_deref(),
                FieldName::new("closedAt"),
            )?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatusFilter {
    Open,
    Overdue,
}

/// Loan listing filters. At most one may be supplied.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct LoanListQuery {
    pub status: Option<LoanStatusFilter>,
    pub client_id: Option<String>,
    pub employee_id: Option<String>,
    pub book_id: Option<String>,
}

impl LoanListQuery {
    fn listing(&self) -> ApiResult<LoanListing> {
        let supplied = [
            self.status.is_some(),
            self.client_id.is_some(),
            self.employee_id.is_some(),
            self.book_id.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count();
        if supplied > 1 {
            return Err(Error::invalid_request("only one loan filter may be supplied")
                .with_details(json!({ "code": "conflicting_filters" })));
        }

        if let Some(status) = self.status {
            return Ok(match status {
                LoanStatusFilter::Open => LoanListing::Open,
                LoanStatusFilter::Overdue => LoanListing::Overdue,
            });
        }
        if let Some(id) = parse_optional_id(self.client_id.as_deref(), FieldName::new("clientId"))? {
            return Ok(LoanListing::ByClient(id));
        }
        if let Some(id) =
            parse_optional_id(self.employee_id.as_deref(), FieldName::new("employeeId"))?
        {
            return Ok(LoanListing::ByEmployee(id));
        }
        if let Some(id) = parse_optional_id(self.book_id.as_deref(), FieldName::new("bookId"))? {
            return Ok(LoanListing::ByBook(id));
        }
        Ok(LoanListing::All)
    }
}

fn loan_id(raw: &str) -> ApiResult<LoanId> {
    parse_id(raw, FieldName::new("loanId"))
}

/// Lend a book to a client.
#[utoipa::path(
    post,
    path = "/api/v1/loans",
    request_body = OpenLoanBody,
    responses(
        (status = 201, description = "Loan opened", body = LoanSchema),
        (status = 400, description = "Loan refused; see details.reason", body = ErrorSchema),
        (status = 404, description = "Client, book or employee not found", body = ErrorSchema)
    ),
    tags = ["loans"],
    operation_id = "openLoan"
)]
#[post("/loans")]
pub async fn open_loan(
    state: web::Data<HttpState>,
    payload: web::Json<OpenLoanBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let request = OpenLoanRequest {
        client_id: parse_id(&body.client_id, FieldName::new("clientId"))?,
        book_id: parse_id(&body.book_id, FieldName::new("bookId"))?,
        employee_id: parse_id(&body.employee_id, FieldName::new("employeeId"))?,
    };
    let loan = state.loans.open_loan(request).await?;
    Ok(HttpResponse::Created().json(loan))
}

#[utoipa::path(
    get,
    path = "/api/v1/loans",
    params(LoanListQuery),
    responses(
        (status = 200, description = "Loans", body = [LoanSchema]),
        (status = 400, description = "Invalid filter", body = ErrorSchema)
    ),
    tags = ["loans"],
    operation_id = "listLoans"
)]
#[get("/loans")]
pub async fn list_loans(
    state: web::Data<HttpState>,
    query: web::Query<LoanListQuery>,
) -> ApiResult<web::Json<Vec<Loan>>> {
    let loans = state.loans_query.list_loans(query.listing()?).await?;
    Ok(web::Json(loans))
}

#[utoipa::path(
    get,
    path = "/api/v1/loans/{id}",
    params(("id" = String, Path, description = "Loan identifier")),
    responses(
        (status = 200, description = "Loan", body = LoanSchema),
        (status = 404, description = "Loan not found", body = ErrorSchema)
    ),
    tags = ["loans"],
    operation_id = "getLoan"
)]
#[get("/loans/{id}")]
pub async fn get_loan(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Loan>> {
    let loan = state.loans_query.get_loan(loan_id(&path)?).await?;
    Ok(web::Json(loan))
}

/// Record the return of a lent book.
#[utoipa::path(
    put,
    path = "/api/v1/loans/{id}/return",
    params(("id" = String, Path, description = "Loan identifier")),
    request_body = ReturnLoanBody,
    responses(
        (status = 200, description = "Loan closed", body = LoanSchema),
        (status = 400, description = "Loan already closed or employee inactive", body = ErrorSchema),
        (status = 404, description = "Loan or employee not found", body = ErrorSchema)
    ),
    tags = ["loans"],
    operation_id = "returnLoan"
)]
#[put("/loans/{id}/return")]
pub async fn return_loan(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ReturnLoanBody>,
) -> ApiResult<web::Json<Loan>> {
    let request = CloseLoanRequest {
        loan_id: loan_id(&path)?,
        employee_id: parse_id(&payload.employee_id, FieldName::new("employeeId"))?,
    };
    let loan = state.loans.close_loan(request).await?;
    Ok(web::Json(loan))
}

#[utoipa::path(
    put,
    path = "/api/v1/loans/{id}",
    params(("id" = String, Path, description = "Loan identifier")),
    request_body = AmendLoanBody,
    responses(
        (status = 200, description = "Loan amended", body = LoanSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Loan or referenced entity not found", body = ErrorSchema)
    ),
    tags = ["loans"],
    operation_id = "amendLoan"
)]
#[put("/loans/{id}")]
pub async fn amend_loan(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AmendLoanBody>,
) -> ApiResult<web::Json<Loan>> {
    let id = loan_id(&path)?;
    let amendment = payload.into_inner().into_amendment()?;
    let loan = state.loans.amend_loan(id, amendment).await?;
    Ok(web::Json(loan))
}

#[utoipa::path(
    delete,
    path = "/api/v1/loans/{id}",
    params(("id" = String, Path, description = "Loan identifier")),
    responses(
        (status = 204, description = "Loan deleted"),
        (status = 404, description = "Loan not found", body = ErrorSchema)
    ),
    tags = ["loans"],
    operation_id = "deleteLoan"
)]
#[delete("/loans/{id}")]
pub async fn delete_loan(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.loans.delete_loan(loan_id(&path)?).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "loans_tests.rs"]
mod tests;
