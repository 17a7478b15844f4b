//! Shared fixtures for integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use showtix_lib::model::Field;
use showtix_lib::model::PurchaseRequest;
use showtix_lib::workflow::PurchaseForm;

/// The fixed "today" all tests validate against.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

/// Raw input for every field that passes validation.
pub const VALID_INPUT: [(Field, &str); 10] = [
    (Field::TicketCount, "2"),
    (Field::FirstName, "Ada"),
    (Field::LastName, "Lovelace"),
    (Field::Email, "ada@example.com"),
    (Field::PhoneNumber, "555-123-4567"),
    (Field::Address, "12 Analytical Way"),
    (Field::CardType, "Mastercard"),
    (Field::CardNumber, "5555 4444 3333 2222"),
    (Field::ExpirationDate, "12/29"),
    (Field::Cvv, "123"),
];

pub fn valid_request(show_id: i64) -> PurchaseRequest {
    let mut request = PurchaseRequest::new(show_id);
    for (field, value) in VALID_INPUT {
        request.set(field, value).unwrap();
    }
    request
}

pub fn valid_form(show_id: i64) -> PurchaseForm {
    let mut form = PurchaseForm::open(show_id);
    for (field, value) in VALID_INPUT {
        form.set_field(field, value).unwrap();
    }
    form
}
