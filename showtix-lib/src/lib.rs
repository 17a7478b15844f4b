//! Showtix storefront library
//!
//! Client, purchase-form validation and submission workflow for an
//! event-ticketing API.

pub mod api;
pub mod catalog;
pub mod error;
pub mod model;
pub mod validation;
pub mod workflow;

mod client;
mod config;

pub use client::*;
pub use config::*;
