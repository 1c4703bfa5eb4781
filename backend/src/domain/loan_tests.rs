//! Tests for loan state predicates and rejection mapping.

use super::*;
use crate::domain::ErrorCode;
use chrono::TimeZone;
use rstest::{fixture, rstest};

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn loan(now: DateTime<Utc>) -> Loan {
    Loan::open(ClientId::random(), BookId::random(), EmployeeId::random(), now)
}

#[rstest]
fn open_sets_due_date_one_period_later(loan: Loan, now: DateTime<Utc>) {
    assert_eq!(loan.opened_at(), now);
    assert_eq!(loan.due_at() - loan.opened_at(), TimeDelta::days(14));
    assert!(loan.is_open());
    assert!(loan.closed_at().is_none());
}

#[rstest]
fn overdue_is_evaluated_against_the_given_instant(loan: Loan, now: DateTime<Utc>) {
    assert!(!loan.is_overdue(now + TimeDelta::days(14)));
    assert!(loan.is_overdue(now + TimeDelta::days(14) + TimeDelta::seconds(1)));
}

#[rstest]
fn closed_loans_are_never_overdue(mut loan: Loan, now: DateTime<Utc>) {
    let closer = EmployeeId::random();
    loan.close(closer, now + TimeDelta::days(1));

    assert!(!loan.is_open());
    assert_eq!(loan.employee_id(), closer);
    assert!(!loan.is_overdue(now + TimeDelta::days(60)));
}

#[rstest]
fn amendment_rejects_due_before_open(loan: Loan, now: DateTime<Utc>) {
    let amendment = LoanAmendment {
        client_id: loan.client_id(),
        book_id: loan.book_id(),
        employee_id: loan.employee_id(),
        opened_at: now,
        due_at: now - TimeDelta::days(1),
        closed_at: None,
    };
    assert_eq!(
        loan.amended(&amendment),
        Err(LoanValidationError::DueBeforeOpen)
    );
}

#[rstest]
fn amendment_preserves_identity(loan: Loan, now: DateTime<Utc>) {
    let amendment = LoanAmendment {
        client_id: ClientId::random(),
        book_id: loan.book_id(),
        employee_id: loan.employee_id(),
        opened_at: now,
        due_at: now + TimeDelta::days(30),
        closed_at: Some(now + TimeDelta::days(2)),
    };
    let amended = loan.amended(&amendment).expect("valid amendment");
    assert_eq!(amended.id(), loan.id());
    assert_eq!(amended.client_id(), amendment.client_id);
    assert!(!amended.is_open());
}

#[rstest]
#[case(LoanRejection::ClientNotFound(ClientId::random()), ErrorCode::NotFound, "client_not_found")]
#[case(LoanRejection::BookUnavailable(BookId::random()), ErrorCode::InvalidState, "book_unavailable")]
#[case(LoanRejection::InactiveEmployee(EmployeeId::random()), ErrorCode::InvalidState, "inactive_employee")]
#[case(LoanRejection::LoanLimitReached(ClientId::random()), ErrorCode::LimitExceeded, "loan_limit_reached")]
#[case(LoanRejection::BookAlreadyBorrowed(BookId::random()), ErrorCode::InvalidState, "book_already_borrowed")]
#[case(LoanRejection::LoanNotFound(LoanId::random()), ErrorCode::NotFound, "loan_not_found")]
#[case(LoanRejection::LoanAlreadyReturned(LoanId::random()), ErrorCode::InvalidState, "loan_already_returned")]
fn rejections_map_to_error_codes(
    #[case] rejection: LoanRejection,
    #[case] code: ErrorCode,
    #[case] reason: &str,
) {
    let error = Error::from(rejection);
    assert_eq!(error.code(), code);
    assert_eq!(
        error.details().and_then(|d| d.get("reason")),
        Some(&serde_json::Value::from(reason))
    );
}

#[rstest]
fn filters_select_matching_loans(loan: Loan, now: DateTime<Utc>) {
    assert!(LoanFilter::All.matches(&loan));
    assert!(LoanFilter::Open.matches(&loan));
    assert!(LoanFilter::ByClient(loan.client_id()).matches(&loan));
    assert!(!LoanFilter::ByBook(BookId::random()).matches(&loan));
    assert!(
        LoanFilter::Overdue {
            as_of: now + TimeDelta::days(15)
        }
        .matches(&loan)
    );
}
