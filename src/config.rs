use crate::error::ApiError;
use rust_decimal::Decimal;
use std::env;
use std::time::Duration;
use url::Url;

/// Environment variable holding the transactions API base URL
pub const API_URL_ENV: &str = "PORTOLA_API_URL";

/// Base URL used when `PORTOLA_API_URL` is unset
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// How often the transaction list is re-fetched
pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Grace period after the pointer leaves a checkbox or clear button
pub const HOVER_GRACE: Duration = Duration::from_millis(200);

/// Amounts strictly above this need super admin to be cleared
pub const HIGH_AMOUNT_THRESHOLD: i64 = 10_000;

/// Per-request timeout for API calls
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: Url,
    pub poll_interval: Duration,
    pub hover_grace: Duration,
    pub high_amount_threshold: Decimal,
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            poll_interval: POLL_INTERVAL,
            hover_grace: HOVER_GRACE,
            high_amount_threshold: Decimal::from(HIGH_AMOUNT_THRESHOLD),
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    /// Build a config from the environment. Only the API base URL is configurable.
    pub fn from_env() -> Result<Self, ApiError> {
        match env::var(API_URL_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::with_api_url(&raw),
            _ => Ok(Self::default()),
        }
    }

    pub fn with_api_url(raw: &str) -> Result<Self, ApiError> {
        Ok(Self::new(parse_base_url(raw)?))
    }

    /// Resolve an API path against the base URL, keeping any base path prefix.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Url::parse(DEFAULT_API_URL).expect("default API URL is a valid literal"))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", trimmed, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            trimmed, other
        ))),
    }
}
