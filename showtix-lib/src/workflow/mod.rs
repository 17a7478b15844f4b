//! Purchase submission workflow.
//!
//! A [`PurchaseForm`] validates the customer's input, hands a
//! [`PendingPurchase`] to whoever talks to the API, and turns the answer into a
//! banner plus, on success, a delayed [`Redirect`] to the show's page.

mod form;
pub mod navigation;
mod outcome;

pub use form::*;
pub use navigation::{Redirect, Route, schedule_redirect};
pub use outcome::*;
