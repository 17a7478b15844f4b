//! Purchase form validation.
//!
//! [`validators`] holds the per-field checks; [`Validator`] runs a set of them
//! and collects every failure into a [`ValidationResult`].
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use showtix_lib::model::{Field, PurchaseRequest};
//! use showtix_lib::validation::validate_purchase;
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
//! let request = PurchaseRequest::new(1);
//! let result = validate_purchase(&request, today);
//!
//! assert!(result.is_invalid());
//! assert_eq!(result.get(Field::FirstName), Some("First name is required"));
//! assert_eq!(result.get(Field::TicketCount), None);
//! ```

mod result;
mod validator;
pub mod validators;

pub use result::ValidationResult;
pub use validator::{FieldBuilder, Validator, validate_purchase};
