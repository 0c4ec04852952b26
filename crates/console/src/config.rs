//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ATRIUM_API_BASE_URL` - Base URL of the REST backend (e.g., `https://api.example.com/api/`)
//!
//! ## Optional
//! - `ATRIUM_API_TOKEN` - Bearer token sent with every request
//! - `ATRIUM_REQUEST_TIMEOUT_SECS` - Request timeout (default: none, transport default)
//! - `ATRIUM_SEARCH_DEBOUNCE_MS` - Search quiet period (default: 300)
//! - `ATRIUM_REDIRECT_DELAY_MS` - Delay before leaving a saved form (default: 1500)
//! - `ATRIUM_PAGE_SIZE` - Rows per list page (default: 10)
//! - `ATRIUM_LOG_FORMAT` - `json` or `text` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)

use std::collections::HashMap;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
const DEFAULT_REDIRECT_DELAY_MS: u64 = 1500;
const DEFAULT_PAGE_SIZE: usize = 10;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Structured JSON, one event per line.
    Json,
    #[default]
    Text,
}

/// Console configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// REST backend configuration
    pub api: ApiConfig,
    /// Quiet period before a search query fans out
    pub search_debounce: Duration,
    /// How long a successful form shows its success state before redirecting
    pub redirect_delay: Duration,
    /// Rows per list page
    pub page_size: usize,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

/// REST backend configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL, always ending in `/` so relative paths join beneath it
    pub base_url: Url,
    /// Bearer token
    pub token: Option<SecretString>,
    /// Per-request timeout; `None` leaves the transport default
    pub request_timeout: Option<Duration>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ApiConfig {
    /// Configuration for a backend at `base_url` with no token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL does not parse.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("ATRIUM_API_BASE_URL", base_url)?,
            token: None,
            request_timeout: None,
        })
    }

    fn from_lookup(env: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = get_required_env(env, "ATRIUM_API_BASE_URL")?;
        let base_url = parse_base_url("ATRIUM_API_BASE_URL", &base_url)?;

        let token = get_optional_env(env, "ATRIUM_API_TOKEN").map(|token| {
            if let Err(e) = validate_secret_strength(&token, "ATRIUM_API_TOKEN") {
                tracing::warn!("ATRIUM_API_TOKEN validation warning: {e}");
            }
            SecretString::from(token)
        });

        let request_timeout = get_optional_env(env, "ATRIUM_REQUEST_TIMEOUT_SECS")
            .map(|s| parse_number::<u64>("ATRIUM_REQUEST_TIMEOUT_SECS", &s))
            .transpose()?
            .map(Duration::from_secs);

        Ok(Self {
            base_url,
            token,
            request_timeout,
        })
    }
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(env: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api = ApiConfig::from_lookup(env)?;

        let search_debounce = Duration::from_millis(parse_number(
            "ATRIUM_SEARCH_DEBOUNCE_MS",
            &get_env_or_default(env, "ATRIUM_SEARCH_DEBOUNCE_MS", DEFAULT_SEARCH_DEBOUNCE_MS),
        )?);
        let redirect_delay = Duration::from_millis(parse_number(
            "ATRIUM_REDIRECT_DELAY_MS",
            &get_env_or_default(env, "ATRIUM_REDIRECT_DELAY_MS", DEFAULT_REDIRECT_DELAY_MS),
        )?);
        let page_size: usize = parse_number(
            "ATRIUM_PAGE_SIZE",
            &get_env_or_default(env, "ATRIUM_PAGE_SIZE", DEFAULT_PAGE_SIZE),
        )?;
        if page_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "ATRIUM_PAGE_SIZE".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let log_format = match get_optional_env(env, "ATRIUM_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "ATRIUM_LOG_FORMAT".to_string(),
                    format!("expected 'json' or 'text', got '{other}'"),
                ));
            }
        };

        let sentry_dsn = get_optional_env(env, "SENTRY_DSN");
        let sentry_environment = get_optional_env(env, "SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env(env, "SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            api,
            search_debounce,
            redirect_delay,
            page_size,
            log_format,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
        })
    }

    /// Defaults for everything except the backend location.
    #[must_use]
    pub const fn with_api(api: ApiConfig) -> Self {
        Self {
            api,
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            redirect_delay: Duration::from_millis(DEFAULT_REDIRECT_DELAY_MS),
            page_size: DEFAULT_PAGE_SIZE,
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(env: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    get_optional_env(env, key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable. Blank values count as unset.
fn get_optional_env(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    env(key).filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: impl ToString,
) -> String {
    get_optional_env(env, key).unwrap_or_else(|| default.to_string())
}

fn parse_number<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a base URL and make sure it ends with `/`.
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(value.trim()).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be an absolute http(s) URL".to_string(),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated token."
            ),
        ));
    }

    Ok(())
}
