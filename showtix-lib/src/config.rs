//! Storefront configuration, read once at startup.

use std::time::Duration;

use crate::error::ConfigError;

pub const API_URL_VAR: &str = "SHOWTIX_API_URL";
pub const IMAGE_BASE_URL_VAR: &str = "SHOWTIX_IMAGE_BASE_URL";
pub const TIMEOUT_VAR: &str = "SHOWTIX_TIMEOUT_SECS";
pub const REDIRECT_DELAY_VAR: &str = "SHOWTIX_REDIRECT_DELAY_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Storefront settings.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use showtix_lib::Config;
///
/// let config = Config::from_lookup(|key| match key {
///     "SHOWTIX_API_URL" => Some("https://localhost:7145/api/shows".to_string()),
///     _ => None,
/// })
/// .unwrap();
///
/// assert_eq!(config.redirect_delay, Duration::from_secs(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Shows endpoint; purchases are posted to `{api_url}/purchases`.
    pub api_url: String,
    /// Where show images are served from, if anywhere.
    pub image_base_url: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// How long the confirmation stays up before redirecting.
    pub redirect_delay: Duration,
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_url = get(API_URL_VAR).ok_or(ConfigError::Missing(API_URL_VAR))?;
        check_url(API_URL_VAR, &api_url)?;

        let image_base_url = get(IMAGE_BASE_URL_VAR);
        if let Some(url) = &image_base_url {
            check_url(IMAGE_BASE_URL_VAR, url)?;
        }

        let timeout = match get(TIMEOUT_VAR) {
            Some(raw) => seconds(TIMEOUT_VAR, &raw)?,
            None => DEFAULT_TIMEOUT,
        };
        let redirect_delay = match get(REDIRECT_DELAY_VAR) {
            Some(raw) => seconds(REDIRECT_DELAY_VAR, &raw)?,
            None => DEFAULT_REDIRECT_DELAY,
        };

        Ok(Self {
            api_url,
            image_base_url,
            timeout,
            redirect_delay,
        })
    }
}

fn check_url(key: &'static str, value: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value).map_err(|e| ConfigError::invalid(key, value, e))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(key, value, "expected an http or https URL"));
    }
    Ok(())
}

fn seconds(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::invalid(key, value, e))
}
