//! Error types

mod api;
mod config;
mod field;

pub use api::*;
pub use config::*;
pub use field::*;

/// Top-level error for the storefront library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Field(#[from] FieldError),
}
