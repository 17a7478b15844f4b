//! CLI error type

use showtix_lib::error::{ApiError, ConfigError, Error as LibError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Lib(#[from] LibError),

    #[error("Input error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        Self::Lib(err.into())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Lib(err.into())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
